mod config;
mod playback;
mod presenter;
mod sequencer;
mod timeline;
