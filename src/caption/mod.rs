pub(crate) mod command;
pub(crate) mod provider;
pub(crate) mod static_list;
