mod common;
mod pipeline_tests;
mod template_tests;
