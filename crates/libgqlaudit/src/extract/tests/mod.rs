mod extraction_property_tests;
mod extractor_tests;
mod model_scanner_tests;
mod type_expr_parser_tests;
