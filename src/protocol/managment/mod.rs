//! Network management: device identity (ISO NAME) and the observed network
//! map built from address claims.
pub mod iso_name;
pub mod network_map;
