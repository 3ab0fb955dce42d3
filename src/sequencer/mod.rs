pub(crate) mod display;
pub(crate) mod machine;
pub(crate) mod tiles;
pub(crate) mod timing;
