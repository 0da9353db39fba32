use criterion::{Criterion, criterion_group, criterion_main};
use rift_hid_dk1_protocol::{
    ByteCursor, TrackerMessage, TrackerSample, decode_input_report, report_sizes,
};

fn full_tracker_frame() -> ByteCursor {
    let sample = TrackerSample {
        accel: [1200, -9810, 340],
        gyro: [-15, 22, 7],
    };
    let message = TrackerMessage {
        num_samples: 3,
        timestamp: 1000,
        last_command_id: 0,
        temperature: 2950,
        samples: [sample; 3],
        mag: [120, 65000, 300],
    };
    let mut cursor = ByteCursor::new();
    message.encode(&mut cursor);
    cursor
}

fn benchmark_cursor(c: &mut Criterion) {
    c.bench_function("ByteCursor read_i21", |b| {
        let mut cursor = ByteCursor::from_bytes(&[0x5A; 48]);
        b.iter(|| {
            cursor.rewind();
            for _ in 0..6 {
                std::hint::black_box(cursor.read_i21());
            }
        });
    });
}

fn benchmark_tracker_decode(c: &mut Criterion) {
    c.bench_function("decode_input_report tracker", |b| {
        let mut cursor = full_tracker_frame();
        b.iter(|| {
            cursor.rewind();
            std::hint::black_box(
                decode_input_report(&mut cursor, report_sizes::TRACKER_MESSAGE).ok(),
            );
        });
    });

    c.bench_function("TrackerMessage encode", |b| {
        let mut cursor = full_tracker_frame();
        cursor.rewind();
        let message = TrackerMessage::decode(&mut cursor, report_sizes::TRACKER_MESSAGE)
            .unwrap_or_default();
        b.iter(|| std::hint::black_box(message.encode(&mut cursor)));
    });
}

criterion_group!(benches, benchmark_cursor, benchmark_tracker_decode);
criterion_main!(benches);
