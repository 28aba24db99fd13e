/// Development utilities module
///
/// This module contains utilities for development and testing,
/// such as a range provider that never touches the network.
pub mod mock_provider;
