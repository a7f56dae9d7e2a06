pub mod boxtype;
pub mod catalog;
pub mod error;
pub mod graph;
pub mod instance;
pub mod link;
pub mod param;
pub mod value;

// Re-export commonly used types
pub use boxtype::{ActionFn, BoxType, DisplayFn, OutputFn};
pub use catalog::Catalog;
pub use error::GraphError;
pub use graph::FlowGraph;
pub use instance::BoxInstance;
pub use link::Link;
pub use param::{ParamDescriptor, ParamKind, PortMode};
pub use value::{ParamValues, Value};
