pub(crate) mod noise;
pub(crate) mod particle;
pub(crate) mod store;
