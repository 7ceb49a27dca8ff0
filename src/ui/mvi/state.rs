/// Marker trait for reducer-owned UI state.
///
/// States are replaced wholesale on every dispatch, so they must be
/// cloneable, comparable and have a starting value.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
