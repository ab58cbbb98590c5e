//! Robot Log Tail
//!
//! Client-side core for tailing robot logs from a Loki-compatible backend:
//!
//! - [`build_selector`] turns filter criteria into a label selector
//! - [`StreamEndpoint`] builds the `ws://`/`wss://` tail URL
//! - [`LogBuffer`] keeps the newest 500 entries in arrival order
//! - [`decode_frame`] recognises batch and error frames
//! - [`StreamSession`] drives the connection state machine over an injectable [`Transport`]
//!
//! # Example
//!
//! ```no_run
//! use robot_log_tail::{FilterCriteria, FilterMode, StreamEndpoint, TailRequest};
//!
//! let criteria = FilterCriteria {
//!     mode: FilterMode::Service,
//!     target: "polyflow-webrtc.service".to_string(),
//!     ..FilterCriteria::default()
//! };
//! let endpoint = StreamEndpoint::resolve("http://robot.local:8082", "/api")?;
//! let url = endpoint.tail_url(&TailRequest::new(criteria.selector()).with_limit(Some(200)))?;
//! assert_eq!(url.scheme(), "ws");
//! # Ok::<(), robot_log_tail::TailError>(())
//! ```

mod buffer;
mod connection;
mod error;
mod format;
mod frame;
mod selector;
mod session;
mod stream_url;
mod transport;
mod types;

pub use buffer::{LogBuffer, MAX_LOG_LINES};
pub use connection::{messages, ConnectionState, ConnectionStatus, NORMAL_CLOSURE};
pub use error::TailError;
pub use format::{format_labels, format_timestamp, format_timestamp_in};
pub use frame::{decode_frame, Batch, Frame};
pub use selector::{build_selector, FilterCriteria, FilterMode, DEFAULT_CUSTOM_SELECTOR};
pub use session::{SessionChanges, SessionStats, StreamSession};
pub use stream_url::{normalize_delay, parse_limit, StreamEndpoint, TailRequest, TAIL_PATH};
pub use transport::{SessionEvent, SessionId, Transport, TransportEvent};
pub use types::{LabelSet, LogEntry};
