mod payload_reader;

pub use payload_reader::TokioPayloadReader;
