pub(crate) mod sketch;
