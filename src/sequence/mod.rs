pub(crate) mod collatz;
