//! End-to-end tests: raw PCM chunks in, spectra and waveforms out.

use audio_analyser::{
    Analyser, AnalyserConfig, AnalyserStage, Completion, PcmFormat, SampleFormat,
};
use audio_analyser::windows;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn i16_stereo_chunk(left: &[f32], right: &[f32]) -> Vec<u8> {
    left.iter()
        .zip(right)
        .flat_map(|(&l, &r)| {
            let l = (l * 32_767.0) as i16;
            let r = (r * 32_767.0) as i16;
            [l.to_le_bytes(), r.to_le_bytes()].concat()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Spectral content
// ---------------------------------------------------------------------------

#[test]
fn cosine_tone_peaks_at_its_bin() {
    init_logging();

    let fft_size = 64;
    let bin = 4usize;
    let config = AnalyserConfig {
        fft_size,
        smoothing_time_constant: 0.0,
        window: windows::rectangular,
        throttle_ms: 0,
        ..Default::default()
    };
    let format = PcmFormat {
        sample_rate: 44_100,
        channels: 2,
        sample_format: SampleFormat::I16,
    };
    let mut analyser = Analyser::new(config, format).expect("valid config");

    // Tone on the analysed (left) channel, silence on the other.
    let tone: Vec<f32> = (0..fft_size)
        .map(|i| (std::f32::consts::TAU * bin as f32 * i as f32 / fft_size as f32).cos())
        .collect();
    let silence = vec![0.0f32; fft_size];

    analyser.consume(&i16_stereo_chunk(&tone, &silence));

    let spectrum = analyser.frequency_data(None);
    assert_eq!(spectrum.len(), fft_size / 2);

    let peak = spectrum
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
        .map(|(i, _)| i)
        .unwrap();
    assert_eq!(peak, bin);

    // Half-amplitude tone in one bin: 20·log10(0.5) ≈ -6 dB, i16
    // quantisation included.
    assert!((spectrum[bin] + 6.02).abs() < 0.1, "peak = {} dB", spectrum[bin]);
}

#[test]
fn silence_reads_as_decibel_floor_everywhere() {
    init_logging();

    let config = AnalyserConfig {
        fft_size: 128,
        ..Default::default()
    };
    let format = PcmFormat::default();
    let mut analyser = Analyser::new(config, format).expect("valid config");

    // Several windows' worth of silent stereo PCM.
    let silent_chunk = vec![0u8; 128 * 2 * 2];
    for _ in 0..12 {
        analyser.consume(&silent_chunk);
    }

    assert!(analyser.frequency_data(None).iter().all(|&db| db == -100.0));

    let mut bytes = vec![0xffu8; 64];
    analyser.byte_frequency_data(&mut bytes);
    assert!(bytes.iter().all(|&b| b == 0));
}

// ---------------------------------------------------------------------------
// Streaming stage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stage_passes_audio_through_while_analysing() {
    init_logging();

    let config = AnalyserConfig {
        fft_size: 64,
        throttle_ms: 0,
        ..Default::default()
    };
    let analyser = Analyser::new(config, PcmFormat::default()).expect("valid config");
    let stage = AnalyserStage::new(analyser);
    let handle = stage.handle();

    let (in_tx, in_rx) = tokio::sync::mpsc::channel(32);
    let (out_tx, mut out_rx) = tokio::sync::mpsc::channel(32);

    let tone: Vec<f32> = (0..64)
        .map(|i| (std::f32::consts::TAU * 2.0 * i as f32 / 64.0).cos() * 0.5)
        .collect();
    let chunks: Vec<Vec<u8>> = (0..8)
        .map(|_| i16_stereo_chunk(&tone, &tone))
        .collect();

    for chunk in &chunks {
        in_tx.send(chunk.clone()).await.unwrap();
    }
    drop(in_tx);

    stage.run(in_rx, Some(out_tx)).await;

    // Pass-through fidelity: every chunk arrives downstream byte-for-byte.
    for expected in &chunks {
        assert_eq!(out_rx.recv().await.as_ref(), Some(expected));
    }
    assert!(out_rx.recv().await.is_none());

    // The shared handle sees the analysed signal.
    let analyser = handle.lock().unwrap();
    let tail = analyser.time_data(None);
    assert_eq!(tail.len(), 64);
    let peak = tail.iter().fold(0.0f32, |acc, s| acc.max(s.abs()));
    assert!((peak - 0.5).abs() < 0.01, "waveform peak = {peak}");
}

#[tokio::test]
async fn throttled_stage_still_processes_everything_in_order() {
    init_logging();

    let config = AnalyserConfig {
        fft_size: 64,
        buffer_size: 1_000,
        throttle_ms: 1,
        ..Default::default()
    };
    let format = PcmFormat {
        sample_rate: 44_100,
        channels: 1,
        sample_format: SampleFormat::F32,
    };
    let analyser = Analyser::new(config, format).expect("valid config");
    let stage = AnalyserStage::new(analyser);
    let handle = stage.handle();

    let (in_tx, in_rx) = tokio::sync::mpsc::channel(16);

    // 10 chunks of 100 samples, values encode their global position.
    let all: Vec<f32> = (0..1_000).map(|i| i as f32 / 1_000.0).collect();
    for chunk in all.chunks(100) {
        let bytes: Vec<u8> = chunk.iter().flat_map(|s| s.to_le_bytes()).collect();
        in_tx.send(bytes).await.unwrap();
    }
    drop(in_tx);

    stage.run(in_rx, None).await;

    let analyser = handle.lock().unwrap();
    let tail = analyser.time_data(Some(1_000));
    assert_eq!(tail, all);
}

// ---------------------------------------------------------------------------
// Direct consumption
// ---------------------------------------------------------------------------

#[test]
fn completion_mode_tracks_throughput() {
    init_logging();

    let config = AnalyserConfig {
        fft_size: 64,
        throttle_ms: 50,
        ..Default::default()
    };
    let format = PcmFormat {
        sample_rate: 44_100,
        channels: 1,
        sample_format: SampleFormat::F32,
    };
    let mut analyser = Analyser::new(config, format).expect("valid config");

    // 2205 samples is exactly the 50 ms threshold at 44.1 kHz — still sync.
    assert_eq!(analyser.consume_frames(&vec![0.1; 2_205]), Completion::Sync);
    // One more sample tips it over.
    assert_eq!(analyser.consume_frames(&[0.1]), Completion::Deferred);
}
