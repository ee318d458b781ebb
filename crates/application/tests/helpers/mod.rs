mod mock_ports;

pub use mock_ports::{
    get, MockAddressClassifier, MockDnsRecordQuery, MockNegativeCache, RecordingHandler,
};
