//! Video download and frame sampling.
//!
//! Videos are fetched to a temporary file and piped through native ffprobe/
//! ffmpeg to rip one frame per second, capped to the first four seconds.
//! The temp file is removed when the handle drops, on every path.

use std::path::Path;

use anyhow::{bail, Context, Result};
use image::DynamicImage;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use sightgate_core::SightError;

/// How much of the video is sampled, one frame per whole second.
const MAX_WINDOW_SECS: u64 = 4;

/// Used when the container reports a zero or unreadable frame rate.
const FALLBACK_FPS: u32 = 25;

const VIDEO_EXTENSIONS: [&str; 5] = ["mp4", "avi", "mov", "mkv", "webm"];

/// A decoded frame tagged with the second it was sampled at.
pub struct SampledFrame {
    pub image: DynamicImage,
    pub timestamp_secs: u64,
}

pub fn is_cloudinary_url(url: &str) -> bool {
    url.contains("cloudinary.com")
}

/// Determine the container format for naming the downloaded temp file:
/// content-type header first, then the URL extension, defaulting to mp4.
async fn video_format(client: &reqwest::Client, url: &str) -> String {
    if let Ok(response) = client.head(url).send().await {
        if let Some(content_type) = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(format) = content_type.strip_prefix("video/") {
                return format
                    .split(';')
                    .next()
                    .unwrap_or(format)
                    .trim()
                    .to_string();
            }
        }
    }
    format_from_extension(url).unwrap_or("mp4").to_string()
}

fn format_from_extension(url: &str) -> Option<&'static str> {
    let lower = url.to_lowercase();
    VIDEO_EXTENSIONS
        .iter()
        .find(|ext| lower.ends_with(&format!(".{ext}")))
        .copied()
}

/// Download a video to a named temp file with a matching extension.
///
/// Returning the `NamedTempFile` keeps the file alive exactly as long as the
/// caller's pipeline scope; dropping it deletes the file whether the
/// pipeline succeeded or failed partway through.
pub async fn download_video(
    client: &reqwest::Client,
    url: &str,
) -> Result<NamedTempFile, SightError> {
    let mut url = url.to_string();
    // Cloudinary serves the raw stream only when fl_video is requested.
    if is_cloudinary_url(&url) && !url.contains('?') {
        url.push_str("?fl_video");
    }

    let format = video_format(client, &url).await;
    let temp = tempfile::Builder::new()
        .prefix("sightgate-video-")
        .suffix(&format!(".{format}"))
        .tempfile()
        .map_err(|e| SightError::Download(e.to_string()))?;

    info!(url = %url, path = %temp.path().display(), "downloading video");
    let mut response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| SightError::Download(e.to_string()))?;
    if !response.status().is_success() {
        return Err(SightError::Download(format!(
            "server returned {}",
            response.status()
        )));
    }

    // Stream chunks straight to disk; videos can be far larger than what
    // we want resident per request.
    let mut file = tokio::fs::File::create(temp.path())
        .await
        .map_err(|e| SightError::Download(e.to_string()))?;
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| SightError::Download(e.to_string()))?
    {
        file.write_all(&chunk)
            .await
            .map_err(|e| SightError::Download(e.to_string()))?;
    }
    file.flush()
        .await
        .map_err(|e| SightError::Download(e.to_string()))?;

    Ok(temp)
}

/// Frame rate and frame count as reported by ffprobe.
#[derive(Debug, Clone, Copy)]
pub struct VideoInfo {
    pub fps: u32,
    pub total_frames: u64,
}

/// Probe the container with ffprobe. Fails with `VideoOpen` when the file
/// cannot be opened or has no video stream.
pub async fn probe_video(path: &Path) -> Result<VideoInfo, SightError> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=r_frame_rate,nb_frames,duration",
            "-of",
            "json",
        ])
        .arg(path)
        .output()
        .await
        .map_err(|e| SightError::VideoOpen(e.to_string()))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SightError::VideoOpen(stderr.trim().to_string()));
    }

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)
        .map_err(|e| SightError::VideoOpen(e.to_string()))?;
    let stream = value["streams"]
        .get(0)
        .ok_or_else(|| SightError::VideoOpen("no video stream found".into()))?;

    let fps = stream["r_frame_rate"]
        .as_str()
        .map(parse_frame_rate)
        .unwrap_or(FALLBACK_FPS);
    let total_frames = stream["nb_frames"]
        .as_str()
        .and_then(|s| s.parse().ok())
        .or_else(|| {
            // Some containers omit nb_frames; estimate from the duration.
            stream["duration"]
                .as_str()
                .and_then(|s| s.parse::<f64>().ok())
                .map(|d| (d * f64::from(fps)) as u64)
        })
        .unwrap_or(0);

    Ok(VideoInfo { fps, total_frames })
}

/// Parse ffprobe's `r_frame_rate` fraction (e.g. "30000/1001").
/// Zero or unreadable rates fall back to 25 fps.
pub fn parse_frame_rate(raw: &str) -> u32 {
    let mut parts = raw.splitn(2, '/');
    let numerator: f64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0.0);
    let denominator: f64 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(1.0);
    if numerator <= 0.0 || denominator <= 0.0 {
        return FALLBACK_FPS;
    }
    let fps = (numerator / denominator).round() as u32;
    if fps == 0 {
        FALLBACK_FPS
    } else {
        fps
    }
}

/// Whole-second sampling plan: the frame index at each second `s` in
/// `[0, min(duration, 4s))` is `s * fps`.
pub fn sample_frame_indices(fps: u32, total_frames: u64) -> Vec<u64> {
    let duration = total_frames as f64 / f64::from(fps);
    let window = duration.min(MAX_WINDOW_SECS as f64) as u64;
    (0..window).map(|s| s * u64::from(fps)).collect()
}

/// Extract up to four evenly time-spaced frames from a local video file.
pub async fn extract_frames(path: &Path) -> Result<Vec<SampledFrame>, SightError> {
    let info = probe_video(path).await?;
    debug!(fps = info.fps, total_frames = info.total_frames, "probed video");

    let mut frames = Vec::new();
    for index in sample_frame_indices(info.fps, info.total_frames) {
        let second = index / u64::from(info.fps);
        match decode_frame_at(path, second).await {
            Ok(image) => frames.push(SampledFrame {
                image,
                timestamp_secs: second,
            }),
            Err(e) => {
                // Unreadable frame ends the sampling window early.
                warn!(second, error = %e, "stopping frame extraction");
                break;
            }
        }
    }

    if frames.is_empty() {
        return Err(SightError::NoFramesExtracted);
    }
    Ok(frames)
}

/// Rip one frame at the given second as PNG bytes on stdout.
async fn decode_frame_at(path: &Path, second: u64) -> Result<DynamicImage> {
    let output = Command::new("ffmpeg")
        .args(["-v", "error", "-ss", &second.to_string(), "-i"])
        .arg(path)
        .args(["-frames:v", "1", "-f", "image2pipe", "-vcodec", "png", "-"])
        .output()
        .await
        .context("failed to spawn ffmpeg")?;

    if !output.status.success() || output.stdout.is_empty() {
        bail!(
            "ffmpeg produced no frame at {}s: {}",
            second,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    image::load_from_memory(&output.stdout).context("failed to decode extracted frame")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_second_cap_at_thirty_fps() {
        // A 10-second video at 30 fps samples only the first four seconds.
        assert_eq!(sample_frame_indices(30, 300), vec![0, 30, 60, 90]);
    }

    #[test]
    fn short_video_samples_whole_seconds_only() {
        // 2.5 seconds at 30 fps: seconds 0 and 1.
        assert_eq!(sample_frame_indices(30, 75), vec![0, 30]);
    }

    #[test]
    fn sub_second_video_yields_no_samples() {
        assert!(sample_frame_indices(25, 10).is_empty());
    }

    #[test]
    fn parses_fractional_frame_rates() {
        assert_eq!(parse_frame_rate("30000/1001"), 30);
        assert_eq!(parse_frame_rate("25/1"), 25);
    }

    #[test]
    fn zero_or_garbage_rate_falls_back() {
        assert_eq!(parse_frame_rate("0/0"), FALLBACK_FPS);
        assert_eq!(parse_frame_rate("N/A"), FALLBACK_FPS);
    }

    #[test]
    fn detects_format_from_extension() {
        assert_eq!(format_from_extension("https://x.test/clip.MP4"), Some("mp4"));
        assert_eq!(format_from_extension("https://x.test/clip.webm"), Some("webm"));
        assert_eq!(format_from_extension("https://x.test/clip"), None);
    }

    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// Serve fixed bytes as an mp4 over a throwaway local listener,
    /// answering both the format-probing HEAD and the download GET.
    async fn serve_video_bytes(body: &'static [u8]) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let (mut socket, _) = match listener.accept().await {
                    Ok(conn) => conn,
                    Err(_) => break,
                };
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    loop {
                        let n = match socket.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => n,
                        };
                        let request = String::from_utf8_lossy(&buf[..n]);
                        let head_only = request.starts_with("HEAD");
                        let header = format!(
                            "HTTP/1.1 200 OK\r\ncontent-type: video/mp4\r\ncontent-length: {}\r\n\r\n",
                            body.len()
                        );
                        if socket.write_all(header.as_bytes()).await.is_err() {
                            return;
                        }
                        if !head_only && socket.write_all(body).await.is_err() {
                            return;
                        }
                    }
                });
            }
        });
        format!("http://{addr}/clip.mp4")
    }

    // Both cleanup paths in one test: the temp-dir scan below would race
    // against a concurrently held download handle in a sibling test.
    #[tokio::test]
    async fn download_temp_file_is_removed_on_both_paths() {
        let client = reqwest::Client::new();

        // Success path: the file is streamed to disk and lives exactly as
        // long as the returned handle.
        let url = serve_video_bytes(b"fake-mp4-bytes").await;
        let temp = download_video(&client, &url).await.unwrap();
        let path = temp.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), b"fake-mp4-bytes");
        drop(temp);
        assert!(!path.exists(), "temp file survived the success path");

        // Failure path: port 9 (discard) refuses the connection; the handle
        // never escapes and nothing is left behind.
        let result = download_video(&client, "http://127.0.0.1:9/missing.mp4").await;
        assert!(matches!(result, Err(SightError::Download(_))));
        let stray = std::fs::read_dir(std::env::temp_dir())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .any(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with("sightgate-video-")
            });
        assert!(!stray, "temp file survived the failure path");
    }

    #[test]
    fn recognizes_cloudinary_hosts() {
        assert!(is_cloudinary_url(
            "https://res.cloudinary.com/demo/video/upload/dog.mp4"
        ));
        assert!(!is_cloudinary_url("https://example.com/dog.mp4"));
    }
}
