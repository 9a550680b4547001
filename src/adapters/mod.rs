//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter      | Implements    | Connects to                        |
//! |--------------|---------------|------------------------------------|
//! | `hardware`   | HardwarePort  | `embedded-hal` pins + `DelayNs`    |
//! | `host_link`  | HostLink      | `embassy-sync` frame/status queues |
//! | `log_sink`   | EventSink     | `log` facade (serial console)      |

pub mod hardware;
pub mod host_link;
pub mod log_sink;
