pub mod post_dtos;
pub mod upload_dtos;
// alias so they can be used as `crate::dtos::post` and `crate::dtos::upload`
pub use post_dtos as post;
pub use upload_dtos as upload;
