//! Pure projection from navigation state to a drawable slide view.

mod view;

pub use view::{project, NodeContent, SlideView, ViewNode};
