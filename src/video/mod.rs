pub(crate) mod clip;
pub(crate) mod media;
pub(crate) mod source;
