// Kernel test modules
#[cfg(test)]
mod common;
#[cfg(test)]
mod lifecycle_tests;
