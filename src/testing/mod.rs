mod failing_object_store;
mod fake_text_generator;

pub use failing_object_store::FailingObjectStore;
pub use fake_text_generator::FakeTextGenerator;
