use std::io::Cursor;

use voxanswer::application::ports::{AudioDecodeError, AudioDecoder};
use voxanswer::infrastructure::audio::{
    SymphoniaAudioDecoder, TARGET_SAMPLE_RATE, decode_audio_to_pcm, encode_wav,
};

fn build_wav(sample_rate: u32, channels: u16, frames: usize) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut buffer, spec).unwrap();
        for i in 0..frames {
            let value = ((i as f32 * 0.05).sin() * 8_000.0) as i16;
            for _ in 0..channels {
                writer.write_sample(value).unwrap();
            }
        }
        writer.finalize().unwrap();
    }
    buffer.into_inner()
}

fn read_wav(bytes: &[u8]) -> (hound::WavSpec, usize) {
    let reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    let len = reader.len() as usize;
    (spec, len)
}

#[test]
fn given_16khz_mono_wav_when_decoding_then_returns_normalized_wav_with_same_length() {
    let wav = build_wav(16_000, 1, 1_600);

    let output = SymphoniaAudioDecoder.decode(&wav).unwrap();

    let (spec, len) = read_wav(&output);
    assert_eq!(spec.sample_rate, TARGET_SAMPLE_RATE);
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(len, 1_600);
}

#[test]
fn given_44khz_stereo_wav_when_decoding_then_output_is_16khz_mono() {
    let wav = build_wav(44_100, 2, 44_100);

    let output = SymphoniaAudioDecoder.decode(&wav).unwrap();

    let (spec, len) = read_wav(&output);
    assert_eq!(spec.sample_rate, TARGET_SAMPLE_RATE);
    assert_eq!(spec.channels, 1);
    // one second of audio stays roughly one second long
    assert!((15_000..=16_000).contains(&len), "got {len} samples");
}

#[test]
fn given_stereo_wav_with_opposite_channels_when_decoding_to_pcm_then_frames_average_to_silence() {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: TARGET_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut buffer, spec).unwrap();
        for _ in 0..1_000 {
            writer.write_sample(8_000i16).unwrap();
            writer.write_sample(-8_000i16).unwrap();
        }
        writer.finalize().unwrap();
    }

    let samples = decode_audio_to_pcm(&buffer.into_inner()).unwrap();

    assert_eq!(samples.len(), 1_000);
    assert!(samples.iter().all(|s| s.abs() < 1e-3), "stereo frames were not averaged");
}

#[test]
fn given_wav_when_decoding_to_pcm_then_samples_are_in_unit_range() {
    let wav = build_wav(16_000, 1, 800);

    let samples = decode_audio_to_pcm(&wav).unwrap();

    assert_eq!(samples.len(), 800);
    assert!(samples.iter().all(|s| (-1.0..=1.0).contains(s)));
    assert!(samples.iter().any(|s| *s != 0.0));
}

#[test]
fn given_random_bytes_when_decoding_then_returns_decoding_failed() {
    let result = SymphoniaAudioDecoder.decode(b"this is not audio at all, just text");

    assert!(matches!(result, Err(AudioDecodeError::DecodingFailed(_))));
}

#[test]
fn given_empty_input_when_decoding_then_returns_decoding_failed() {
    let result = SymphoniaAudioDecoder.decode(&[]);

    assert!(matches!(result, Err(AudioDecodeError::DecodingFailed(_))));
}

#[test]
fn given_out_of_range_samples_when_encoding_then_values_are_clamped() {
    let output = encode_wav(&[2.0, -2.0, 0.0]).unwrap();

    let mut reader = hound::WavReader::new(Cursor::new(output)).unwrap();
    let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(samples, vec![i16::MAX, -i16::MAX, 0]);
}
