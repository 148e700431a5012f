//! Integration tests: gestures through the engine to emitted intents.

mod column_workflow_tests;
