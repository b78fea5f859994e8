pub mod assessment_reader;
