// Error codes implementation
// One code per pipeline failure; codes are stable and appear in API error bodies

pub mod classification {
    pub const TRANSPORT: &str = "CLASSIFY_1001";
    pub const EMPTY_RESPONSE: &str = "CLASSIFY_1002";
    pub const UNRECOGNIZED: &str = "CLASSIFY_1003";
}

pub mod schema {
    pub const NOT_FOUND: &str = "SCHEMA_2001";
    pub const FETCH_FAILED: &str = "SCHEMA_2002";
}

pub mod values {
    pub const NOT_FOUND: &str = "VALUES_3001";
    pub const FETCH_FAILED: &str = "VALUES_3002";
}

pub mod inference {
    pub const FAILED: &str = "INFER_4001";
}

pub mod output {
    pub const MALFORMED: &str = "OUTPUT_5001";
}

pub mod validation {
    pub const CONSTRAINT_VIOLATION: &str = "VALIDATE_6001";
    pub const INVALID_SCHEMA: &str = "VALIDATE_6002";
}

pub mod request {
    pub const BAD_REQUEST: &str = "REQUEST_7001";
    pub const NOT_FOUND: &str = "REQUEST_7002";
    pub const INTERNAL: &str = "REQUEST_7003";
}
