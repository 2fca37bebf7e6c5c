mod introspection_tests;
mod snapshot_codec_tests;
