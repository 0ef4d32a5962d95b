use crate::DESCRIPTOR_POOL;

include!(concat!(env!("OUT_DIR"), "/validate.rs"));
