//! Transparent compression for path-backed sources and sinks.
//!
//! A path such as `data.csv.gz` is read through a gzip decoder and written
//! through a gzip encoder without the document knowing about it. Detection
//! checks the file extension first and, for reads only, falls back to the
//! magic bytes at the start of the stream.
//!
//! ## Built-in Codecs
//!
//! Each codec is compiled in by its feature flag (all enabled by default):
//! - **Gzip** (`.gz`, `.gzip`) - feature `compression-gzip`
//! - **Zstd** (`.zst`, `.zstd`) - feature `compression-zstd`
//! - **Bzip2** (`.bz2`, `.bzip2`) - feature `compression-bzip2`
//! - **Xz** (`.xz`) - feature `compression-xz`
//!
//! With no codec features enabled both entry points are plain buffered
//! pass-throughs.

use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// A compression algorithm that can wrap a byte source or sink.
pub trait CompressionCodec: Send + Sync {
    /// Human-readable codec name (e.g. "gzip").
    fn name(&self) -> &'static str;

    /// Lowercase file extensions with the leading dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Signature at the start of a compressed stream, if the format has one.
    fn magic_bytes(&self) -> Option<&'static [u8]>;

    fn wrap_reader(&self, reader: Box<dyn Read>) -> io::Result<Box<dyn Read>>;

    fn wrap_writer(&self, writer: Box<dyn Write>) -> io::Result<Box<dyn Write>>;
}

/// Codecs compiled into this build.
static CODECS: &[&dyn CompressionCodec] = &[
    #[cfg(feature = "compression-gzip")]
    &GzipCodec,
    #[cfg(feature = "compression-zstd")]
    &ZstdCodec,
    #[cfg(feature = "compression-bzip2")]
    &Bzip2Codec,
    #[cfg(feature = "compression-xz")]
    &XzCodec,
];

/// Codec whose extension matches `path`, case-insensitively.
pub fn detect_from_extension(path: &Path) -> Option<&'static dyn CompressionCodec> {
    let name = path.to_string_lossy().to_lowercase();
    CODECS
        .iter()
        .copied()
        .find(|c| c.extensions().iter().any(|ext| name.ends_with(ext)))
}

/// Codec whose signature starts the buffered stream. Does not consume input.
fn detect_from_magic<R: BufRead>(reader: &mut R) -> Option<&'static dyn CompressionCodec> {
    let buf = reader.fill_buf().ok()?;
    if buf.is_empty() {
        return None;
    }
    CODECS
        .iter()
        .copied()
        .find(|c| c.magic_bytes().is_some_and(|m| buf.starts_with(m)))
}

/// Wrap `reader` with a decompressor when `path_hint` or the stream's magic
/// bytes name a known codec; otherwise return it buffered.
pub fn auto_detect_reader<R: Read + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> io::Result<Box<dyn Read>> {
    if let Some(codec) = detect_from_extension(path_hint.as_ref()) {
        tracing::debug!(codec = codec.name(), "decompressing source by extension");
        return codec.wrap_reader(Box::new(reader));
    }

    let mut buffered = BufReader::new(reader);
    if let Some(codec) = detect_from_magic(&mut buffered) {
        tracing::debug!(codec = codec.name(), "decompressing source by magic bytes");
        return codec.wrap_reader(Box::new(buffered));
    }
    Ok(Box::new(buffered))
}

/// Wrap `writer` with a compressor when the extension of `path_hint` names a
/// known codec; otherwise return it buffered.
pub fn auto_detect_writer<W: Write + 'static>(
    writer: W,
    path_hint: impl AsRef<Path>,
) -> io::Result<Box<dyn Write>> {
    if let Some(codec) = detect_from_extension(path_hint.as_ref()) {
        tracing::debug!(codec = codec.name(), "compressing sink by extension");
        return codec.wrap_writer(Box::new(writer));
    }
    Ok(Box::new(BufWriter::new(writer)))
}

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl CompressionCodec for GzipCodec {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".gz", ".gzip"]
    }

    fn magic_bytes(&self) -> Option<&'static [u8]> {
        Some(&[0x1f, 0x8b])
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(flate2::read::GzDecoder::new(reader)))
    }

    fn wrap_writer(&self, writer: Box<dyn Write>) -> io::Result<Box<dyn Write>> {
        Ok(Box::new(flate2::write::GzEncoder::new(
            writer,
            flate2::Compression::default(),
        )))
    }
}

#[cfg(feature = "compression-zstd")]
struct ZstdCodec;

#[cfg(feature = "compression-zstd")]
impl CompressionCodec for ZstdCodec {
    fn name(&self) -> &'static str {
        "zstd"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".zst", ".zstd"]
    }

    fn magic_bytes(&self) -> Option<&'static [u8]> {
        Some(&[0x28, 0xb5, 0x2f, 0xfd])
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> io::Result<Box<dyn Read>> {
        zstd::stream::read::Decoder::new(reader).map(|d| Box::new(d) as Box<dyn Read>)
    }

    fn wrap_writer(&self, writer: Box<dyn Write>) -> io::Result<Box<dyn Write>> {
        zstd::stream::write::Encoder::new(writer, 3)
            .map(|e| Box::new(e.auto_finish()) as Box<dyn Write>)
    }
}

#[cfg(feature = "compression-bzip2")]
struct Bzip2Codec;

#[cfg(feature = "compression-bzip2")]
impl CompressionCodec for Bzip2Codec {
    fn name(&self) -> &'static str {
        "bzip2"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".bz2", ".bzip2"]
    }

    fn magic_bytes(&self) -> Option<&'static [u8]> {
        Some(&[0x42, 0x5a, 0x68])
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(bzip2::read::BzDecoder::new(reader)))
    }

    fn wrap_writer(&self, writer: Box<dyn Write>) -> io::Result<Box<dyn Write>> {
        Ok(Box::new(bzip2::write::BzEncoder::new(
            writer,
            bzip2::Compression::default(),
        )))
    }
}

#[cfg(feature = "compression-xz")]
struct XzCodec;

#[cfg(feature = "compression-xz")]
impl CompressionCodec for XzCodec {
    fn name(&self) -> &'static str {
        "xz"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".xz"]
    }

    fn magic_bytes(&self) -> Option<&'static [u8]> {
        Some(&[0xfd, 0x37, 0x7a, 0x58, 0x5a, 0x00])
    }

    fn wrap_reader(&self, reader: Box<dyn Read>) -> io::Result<Box<dyn Read>> {
        Ok(Box::new(xz2::read::XzDecoder::new(reader)))
    }

    fn wrap_writer(&self, writer: Box<dyn Write>) -> io::Result<Box<dyn Write>> {
        Ok(Box::new(xz2::write::XzEncoder::new(writer, 6)))
    }
}
