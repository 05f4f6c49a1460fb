pub(crate) mod conical;
pub(crate) mod dither;
pub(crate) mod stops;
