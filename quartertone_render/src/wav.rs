// WAV encoding for 16-bit mono PCM.
//
// Writes a canonical 44-byte RIFF/WAVE header (one `fmt ` chunk, one `data`
// chunk) followed by little-endian samples.

use crate::error::RenderError;
use crate::tone::RenderedScale;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const NUM_CHANNELS: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const BLOCK_ALIGN: u16 = NUM_CHANNELS * (BITS_PER_SAMPLE / 8);

pub fn write_wav(w: &mut impl Write, samples: &[i16], sample_rate: u32) -> std::io::Result<()> {
    let data_size = samples.len() as u32 * u32::from(BLOCK_ALIGN);
    write_riff_header(w, data_size)?;
    write_fmt_chunk(w, sample_rate)?;
    write_data_chunk(w, samples, data_size)
}

/// Write `<dir>/<file_stem>.wav` and return its path.
pub fn save_wav(rendered: &RenderedScale, dir: &Path) -> Result<PathBuf, RenderError> {
    let path = dir.join(format!("{}.wav", rendered.file_stem));
    let mut w = BufWriter::new(File::create(&path)?);
    write_wav(&mut w, &rendered.samples, rendered.sample_rate)?;
    w.flush()?;
    tracing::info!(path = %path.display(), samples = rendered.samples.len(), "wrote WAV");
    Ok(path)
}

fn write_riff_header(w: &mut impl Write, data_size: u32) -> std::io::Result<()> {
    w.write_all(b"RIFF")?;
    w.write_all(&(36 + data_size).to_le_bytes())?;
    w.write_all(b"WAVE")
}

fn write_fmt_chunk(w: &mut impl Write, sample_rate: u32) -> std::io::Result<()> {
    w.write_all(b"fmt ")?;
    w.write_all(&16u32.to_le_bytes())?;
    w.write_all(&1u16.to_le_bytes())?; // PCM
    w.write_all(&NUM_CHANNELS.to_le_bytes())?;
    w.write_all(&sample_rate.to_le_bytes())?;
    w.write_all(&(sample_rate * u32::from(BLOCK_ALIGN)).to_le_bytes())?;
    w.write_all(&BLOCK_ALIGN.to_le_bytes())?;
    w.write_all(&BITS_PER_SAMPLE.to_le_bytes())
}

fn write_data_chunk(w: &mut impl Write, samples: &[i16], data_size: u32) -> std::io::Result<()> {
    w.write_all(b"data")?;
    w.write_all(&data_size.to_le_bytes())?;
    for sample in samples {
        w.write_all(&sample.to_le_bytes())?;
    }
    Ok(())
}
