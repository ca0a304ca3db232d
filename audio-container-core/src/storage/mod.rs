pub mod reader;
pub mod streaming_writer;
pub mod wav_writer;
