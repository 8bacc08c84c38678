mod dimmer_tests;
mod input_tests;
