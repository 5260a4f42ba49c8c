pub mod aggregate;
pub mod collection;

pub use aggregate::{
    AttachmentFile, Dimension, DimensionKind, Dimensions, LogoItem, LogoItemId, RelatedProduct,
};
pub use collection::LogoCollection;
