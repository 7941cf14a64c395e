//! # Phone Frame
//!
//! Composites photos into a fixed-size phone frame template to produce
//! wallpaper mockups, and tiles several mockups into a grid.
//!
//! # Architecture: One Pipeline, Explicit State
//!
//! Every wallpaper goes through the same fixed pipeline:
//!
//! ```text
//! source photo → resize to cover 393×852 → center crop → round corners (22 px)
//!   → paste on a 471×923 background canvas → template on top
//! ```
//!
//! A grid layout then tiles `rows × cols` of those frames row-major onto an
//! opaque canvas of `cols·471 × rows·923`. The result is written as PNG or
//! JPEG to a path chosen by the caller or generated from the naming policy.
//!
//! Nothing is global. The upload list, layout and last render live in a
//! [`session::Session`] the caller owns; the template, background and image
//! backend live in an [`imaging::Compositor`]; configuration is an
//! immutable [`config::AppConfig`] value.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | The compositing pipeline: color parsing, dimension math, pixel operations, template, encode/decode backend |
//! | [`session`] | Upload list management, layout, readiness, process and save |
//! | [`save`] | Resolves where a render is written (interactive path or silent naming policy) |
//! | [`naming`] | `wallpaper_<NNN>` / `wallpaper_<YYYYMMDD_HHMMSS>` filename formatting and parsing |
//! | [`config`] | `config.toml` loading, validation, defaults and the stock file |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Strict Input, No Silent Defaults
//!
//! A malformed background color, an unreadable template, or a template of
//! the wrong size is an error, not a fallback to black or a resized frame.
//! The same applies to the config file: a key that is absent takes its
//! default, a key that is present must parse.
//!
//! ## Straight Alpha Throughout
//!
//! All blending is source-over on straight (non-premultiplied) RGBA. The
//! canvas starts opaque, so a single frame stays fully opaque after the
//! template goes on top. Grids are flattened onto the background color and
//! stored as RGB, which is also what JPEG output needs.
//!
//! ## Backend Trait at the I/O Seam
//!
//! Decoding and encoding go through [`imaging::ImageBackend`]. The pixel
//! work in between never touches the filesystem, so tests run the whole
//! pipeline against an in-memory mock and only a handful of tests touch
//! real files.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod save;
pub mod session;
