//! Photo metadata lookup: file facts, hashes, EXIF and GPS.

use crate::catalog::{render_all, Catalog, Link};
use crate::error::ProbeResultOf;
use exif::{Context, Exif, In, Tag, Value};
use md5::Md5;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileInfo {
    pub filename: String,
    pub size_bytes: u64,
    pub size_kb: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileHashes {
    pub md5: String,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GpsDecimal {
    pub latitude: f64,
    pub longitude: f64,
    pub map_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PhotoFindings {
    pub target: String,
    pub file_info: FileInfo,
    pub hashes: FileHashes,
    pub exif_data: BTreeMap<String, String>,
    pub gps_data: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gps_decimal: Option<GpsDecimal>,
    pub reverse_search: Vec<Link>,
}

pub async fn investigate(catalog: &Catalog, path: &Path) -> ProbeResultOf<PhotoFindings> {
    let bytes = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read photo");

    let (exif_data, gps_data, gps_decimal) = match read_exif(&bytes) {
        Some(exif) => {
            let (tags, gps) = exif_tags(&exif);
            (tags, gps, gps_position(&exif))
        }
        None => Default::default(),
    };

    Ok(PhotoFindings {
        target: path.display().to_string(),
        file_info: file_info(path, &bytes),
        hashes: FileHashes {
            md5: format!("{:x}", Md5::digest(&bytes)),
            sha256: format!("{:x}", Sha256::digest(&bytes)),
        },
        exif_data,
        gps_data,
        gps_decimal,
        reverse_search: render_all(&catalog.resources.photo_reverse_search, &[]),
    })
}

fn file_info(path: &Path, bytes: &[u8]) -> FileInfo {
    let size_bytes = bytes.len() as u64;

    FileInfo {
        filename: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        size_bytes,
        size_kb: (size_bytes as f64 / 1024.0 * 100.0).round() / 100.0,
        dimensions: imagesize::blob_size(bytes)
            .ok()
            .map(|size| format!("{}x{}", size.width, size.height)),
        format: imagesize::image_type(bytes)
            .ok()
            .map(|kind| format!("{:?}", kind).to_uppercase()),
    }
}

/// A photo without EXIF is not an error.
fn read_exif(bytes: &[u8]) -> Option<Exif> {
    match exif::Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => Some(exif),
        Err(e) => {
            tracing::debug!(error = %e, "no EXIF data");
            None
        }
    }
}

/// Primary-image tags, with GPS tags split out.
fn exif_tags(exif: &Exif) -> (BTreeMap<String, String>, BTreeMap<String, String>) {
    let mut tags = BTreeMap::new();
    let mut gps = BTreeMap::new();

    for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
        let value = field
            .display_value()
            .with_unit(exif)
            .to_string()
            .trim_matches(|c: char| c == '"' || c == '\0' || c.is_whitespace())
            .to_string();

        if field.tag.context() == Context::Gps {
            gps.insert(field.tag.to_string(), value);
        } else {
            tags.insert(field.tag.to_string(), value);
        }
    }

    (tags, gps)
}

fn gps_position(exif: &Exif) -> Option<GpsDecimal> {
    let latitude = gps_coordinate(exif, Tag::GPSLatitude, Tag::GPSLatitudeRef)?;
    let longitude = gps_coordinate(exif, Tag::GPSLongitude, Tag::GPSLongitudeRef)?;

    Some(GpsDecimal {
        latitude,
        longitude,
        map_url: format!("https://maps.google.com/?q={},{}", latitude, longitude),
    })
}

fn gps_coordinate(exif: &Exif, value_tag: Tag, ref_tag: Tag) -> Option<f64> {
    let field = exif.get_field(value_tag, In::PRIMARY)?;
    let Value::Rational(ref parts) = field.value else {
        return None;
    };
    if parts.len() < 3 {
        return None;
    }

    let reference = exif
        .get_field(ref_tag, In::PRIMARY)
        .and_then(|f| match f.value {
            Value::Ascii(ref values) => values
                .first()
                .map(|v| String::from_utf8_lossy(v).trim().to_string()),
            _ => None,
        });

    let value = dms_to_decimal(
        parts[0].to_f64(),
        parts[1].to_f64(),
        parts[2].to_f64(),
        reference.as_deref(),
    );
    // A zero denominator yields NaN or infinity.
    value.is_finite().then_some(value)
}

/// Convert degrees/minutes/seconds to decimal degrees; `S` and `W` are
/// negative.
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64, reference: Option<&str>) -> f64 {
    let value = degrees + minutes / 60.0 + seconds / 3600.0;
    match reference {
        Some("S") | Some("W") => -value,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Signature and IHDR chunk of a 3x2 PNG.
    fn tiny_png() -> Vec<u8> {
        let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        bytes.extend_from_slice(&[0, 0, 0, 13]);
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&3u32.to_be_bytes());
        bytes.extend_from_slice(&2u32.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes.extend_from_slice(&[0, 0, 0, 0]);
        bytes
    }

    /// Little-endian TIFF whose IFD0 points at a GPS IFD holding latitude,
    /// longitude and their references. Each coordinate is three
    /// numerator/denominator pairs.
    fn gps_tiff(lat: [(u32, u32); 3], lat_ref: u8, lon: [(u32, u32); 3], lon_ref: u8) -> Vec<u8> {
        fn entry(bytes: &mut Vec<u8>, tag: u16, kind: u16, count: u32, value: [u8; 4]) {
            bytes.extend_from_slice(&tag.to_le_bytes());
            bytes.extend_from_slice(&kind.to_le_bytes());
            bytes.extend_from_slice(&count.to_le_bytes());
            bytes.extend_from_slice(&value);
        }
        const ASCII: u16 = 2;
        const LONG: u16 = 4;
        const RATIONAL: u16 = 5;
        const GPS_IFD: u32 = 26;
        const LAT_OFFSET: u32 = 80;
        const LON_OFFSET: u32 = 104;

        let mut bytes = b"II".to_vec();
        bytes.extend_from_slice(&42u16.to_le_bytes());
        bytes.extend_from_slice(&8u32.to_le_bytes());

        bytes.extend_from_slice(&1u16.to_le_bytes());
        entry(&mut bytes, 0x8825, LONG, 1, GPS_IFD.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(bytes.len() as u32, GPS_IFD);

        bytes.extend_from_slice(&4u16.to_le_bytes());
        entry(&mut bytes, 1, ASCII, 2, [lat_ref, 0, 0, 0]);
        entry(&mut bytes, 2, RATIONAL, 3, LAT_OFFSET.to_le_bytes());
        entry(&mut bytes, 3, ASCII, 2, [lon_ref, 0, 0, 0]);
        entry(&mut bytes, 4, RATIONAL, 3, LON_OFFSET.to_le_bytes());
        bytes.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(bytes.len() as u32, LAT_OFFSET);

        for (num, denom) in lat.into_iter().chain(lon) {
            bytes.extend_from_slice(&num.to_le_bytes());
            bytes.extend_from_slice(&denom.to_le_bytes());
        }
        bytes
    }

    async fn investigate_bytes(name: &str, bytes: Vec<u8>) -> PhotoFindings {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();

        let catalog = Catalog::builtin().unwrap();
        investigate(&catalog, &path).await.unwrap()
    }

    #[tokio::test]
    async fn test_gps_tags_split_and_signed() {
        let tiff = gps_tiff([(7, 1), (15, 1), (0, 1)], b'S', [(112, 1), (45, 1), (0, 1)], b'W');
        let findings = investigate_bytes("geo.tif", tiff).await;

        for key in ["GPSLatitude", "GPSLatitudeRef", "GPSLongitude", "GPSLongitudeRef"] {
            assert!(findings.gps_data.contains_key(key), "missing {}", key);
            assert!(!findings.exif_data.contains_key(key));
        }
        assert!(findings.exif_data.is_empty());
        assert_eq!(findings.gps_data["GPSLatitudeRef"], "S");
        assert_eq!(findings.gps_data["GPSLongitudeRef"], "W");

        let gps = findings.gps_decimal.unwrap();
        assert_eq!(gps.latitude, -7.25);
        assert_eq!(gps.longitude, -112.75);
        assert_eq!(gps.map_url, "https://maps.google.com/?q=-7.25,-112.75");
    }

    #[tokio::test]
    async fn test_gps_zero_denominator_has_no_position() {
        let tiff = gps_tiff([(7, 0), (15, 1), (0, 1)], b'N', [(0, 0), (45, 1), (0, 1)], b'E');
        let findings = investigate_bytes("broken.tif", tiff).await;

        assert!(findings.gps_data.contains_key("GPSLatitude"));
        assert!(findings.gps_decimal.is_none());
    }

    #[test]
    fn test_dms_to_decimal() {
        assert_eq!(dms_to_decimal(7.0, 15.0, 0.0, Some("S")), -7.25);
        assert_eq!(dms_to_decimal(112.0, 45.0, 0.0, Some("E")), 112.75);
        assert_eq!(dms_to_decimal(10.0, 30.0, 0.0, Some("W")), -10.5);
    }

    #[tokio::test]
    async fn test_photo_without_exif() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        std::fs::write(&path, tiny_png()).unwrap();

        let catalog = Catalog::builtin().unwrap();
        let findings = investigate(&catalog, &path).await.unwrap();

        assert_eq!(findings.file_info.filename, "pixel.png");
        assert_eq!(findings.file_info.size_bytes, 33);
        assert_eq!(findings.file_info.dimensions.as_deref(), Some("3x2"));
        assert_eq!(findings.file_info.format.as_deref(), Some("PNG"));
        assert_eq!(findings.hashes.sha256.len(), 64);
        assert!(findings.exif_data.is_empty());
        assert!(findings.gps_decimal.is_none());
        assert_eq!(findings.reverse_search.len(), 4);
    }
}
