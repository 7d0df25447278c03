// src/document/export.rs

//! Writing generated batches to disk.
//!
//! Two formats: pretty JSON of the whole [`PathBatch`], and a compact
//! little-endian point dump.
//!
//! ```text
//! offset  field         type
//! ------  ------------  ----
//!  0-3    magic         b"RWSP"
//!  4-7    version       u32 (1)
//!  8-11   seed          u32
//! 12-15   path count    u32
//! then per path:
//!         index         u32
//!         point count   u32
//!         points        [f64; 3] * point count
//! ```

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path as FsPath;

use byteorder::{ReadBytesExt, WriteBytesExt, LE};

use crate::editor::generator::PathBatch;
use crate::editor::walker::Path;
use crate::error::GeneratorError;
use crate::utils::geometry::Vector3;

pub const POINTS_MAGIC: &[u8; 4] = b"RWSP";
pub const POINTS_VERSION: u32 = 1;

pub fn to_json(batch: &PathBatch) -> Result<String, GeneratorError> {
    Ok(serde_json::to_string_pretty(batch)?)
}

pub fn from_json(json: &str) -> Result<PathBatch, GeneratorError> {
    Ok(serde_json::from_str(json)?)
}

pub fn save_json<P: AsRef<FsPath>>(batch: &PathBatch, path: P) -> Result<(), GeneratorError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, batch)?;
    writer.flush()?;
    Ok(())
}

pub fn write_points<W: Write>(writer: &mut W, batch: &PathBatch) -> io::Result<()> {
    writer.write_all(POINTS_MAGIC)?;
    writer.write_u32::<LE>(POINTS_VERSION)?;
    writer.write_u32::<LE>(batch.seed)?;
    writer.write_u32::<LE>(len_u32(batch.paths.len())?)?;

    for path in &batch.paths {
        writer.write_u32::<LE>(len_u32(path.index)?)?;
        writer.write_u32::<LE>(len_u32(path.points.len())?)?;
        for p in &path.points {
            writer.write_f64::<LE>(p.x)?;
            writer.write_f64::<LE>(p.y)?;
            writer.write_f64::<LE>(p.z)?;
        }
    }
    Ok(())
}

pub fn read_points<R: Read>(reader: &mut R) -> io::Result<PathBatch> {
    let mut magic = [0u8; 4];
    reader.read_exact(&mut magic)?;
    if &magic != POINTS_MAGIC {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "not a point dump"));
    }
    let version = reader.read_u32::<LE>()?;
    if version != POINTS_VERSION {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("unsupported point dump version {}", version),
        ));
    }

    let seed = reader.read_u32::<LE>()?;
    let count = reader.read_u32::<LE>()? as usize;
    let mut paths = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let index = reader.read_u32::<LE>()? as usize;
        let len = reader.read_u32::<LE>()? as usize;
        let mut points = Vec::with_capacity(len.min(1024));
        for _ in 0..len {
            let x = reader.read_f64::<LE>()?;
            let y = reader.read_f64::<LE>()?;
            let z = reader.read_f64::<LE>()?;
            points.push(Vector3::new(x, y, z));
        }
        paths.push(Path { index, points });
    }

    Ok(PathBatch { seed, paths })
}

pub fn save_points<P: AsRef<FsPath>>(batch: &PathBatch, path: P) -> Result<(), GeneratorError> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_points(&mut writer, batch)?;
    writer.flush()?;
    Ok(())
}

pub fn load_points<P: AsRef<FsPath>>(path: P) -> Result<PathBatch, GeneratorError> {
    let mut reader = BufReader::new(File::open(path)?);
    Ok(read_points(&mut reader)?)
}

fn len_u32(n: usize) -> io::Result<u32> {
    u32::try_from(n).map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "count does not fit in u32"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WalkParameters;
    use crate::editor::generator::BatchGenerator;
    use std::io::Cursor;

    fn sample() -> PathBatch {
        BatchGenerator::new().generate(&WalkParameters {
            seed: 17,
            curve_count: 3,
            path_length: 9,
            ..WalkParameters::default()
        })
    }

    #[test]
    fn test_point_dump_layout() {
        let mut buf = Vec::new();
        write_points(&mut buf, &sample()).unwrap();

        assert_eq!(&buf[0..4], b"RWSP");
        assert_eq!(&buf[4..8], &1u32.to_le_bytes());
        assert_eq!(&buf[8..12], &17u32.to_le_bytes());
        assert_eq!(&buf[12..16], &3u32.to_le_bytes());
        assert_eq!(buf.len(), 16 + 3 * (8 + 9 * 24));
    }

    #[test]
    fn test_point_dump_preserves_bits() {
        let batch = sample();
        let mut buf = Vec::new();
        write_points(&mut buf, &batch).unwrap();
        let back = read_points(&mut Cursor::new(buf)).unwrap();
        assert_eq!(back, batch);
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let err = read_points(&mut Cursor::new(b"NOPE\x01\0\0\0".to_vec())).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let mut buf = POINTS_MAGIC.to_vec();
        buf.extend_from_slice(&7u32.to_le_bytes());
        let err = read_points(&mut Cursor::new(buf)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_truncated_dump_fails() {
        let mut buf = Vec::new();
        write_points(&mut buf, &sample()).unwrap();
        buf.truncate(buf.len() - 5);
        let err = read_points(&mut Cursor::new(buf)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let batch = sample();

        let json_path = dir.path().join("batch.json");
        save_json(&batch, &json_path).unwrap();
        let json = std::fs::read_to_string(&json_path).unwrap();
        assert_eq!(to_json(&batch).unwrap(), json);
        assert!(json.contains("\"seed\": 17"));
        assert_eq!(from_json(&json).unwrap(), batch);

        let points_path = dir.path().join("batch.rwsp");
        save_points(&batch, &points_path).unwrap();
        assert_eq!(load_points(&points_path).unwrap(), batch);
    }
}
