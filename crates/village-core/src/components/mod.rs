mod hierarchy;
mod name;
mod transform;

pub use hierarchy::{Children, Parent};
pub use name::Name;
pub use transform::{ModelUniform, Transform};
