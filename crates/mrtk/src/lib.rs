#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use mrtk_tensor as tensor;

#[doc(inline)]
pub use mrtk_tensor_ops as tensor_ops;
