mod fixtures;
mod registry_tests;
