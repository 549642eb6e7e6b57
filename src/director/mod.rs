pub(crate) mod assign;
pub(crate) mod machine;
pub(crate) mod pages;
