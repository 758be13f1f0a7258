//! Live preview: renders a page document to a virtual DOM whose block
//! elements carry the id of the block they came from.

mod renderer;
pub mod vdom;

pub use renderer::{render_preview, PreviewOptions};
pub use vdom::{VNode, VirtualDomDocument};
