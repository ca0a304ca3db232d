pub mod sample_codec;
