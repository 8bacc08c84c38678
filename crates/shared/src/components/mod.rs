pub mod dimmer;
