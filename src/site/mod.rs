pub(crate) mod router;
pub(crate) mod storage;
pub(crate) mod theme;
