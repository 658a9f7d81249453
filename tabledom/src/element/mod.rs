mod builder;
mod node;

pub use builder::Element;
pub use node::NodeId;
pub(crate) use node::Node;
