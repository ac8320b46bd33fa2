// ABOUTME: Benchmark suite for PDU codec performance testing
// ABOUTME: Measures decode and encode throughput for common operations

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use smpp_pdu::datatypes::{NumericPlanIndicator, Tag, TypeOfNumber};
use smpp_pdu::{operations, Pdu};

fn sample_submit_sm() -> Pdu {
    operations::submit_sm()
        .sequence_number(1)
        .field("source_addr_ton", TypeOfNumber::International)
        .field("source_addr_npi", NumericPlanIndicator::Isdn)
        .field("source_addr", "16505551234")
        .field("dest_addr_ton", TypeOfNumber::International)
        .field("dest_addr_npi", NumericPlanIndicator::Isdn)
        .field("destination_addr", "17735554070")
        .field("short_message", &b"Hello World"[..])
        .tlv(Tag::UserMessageReference, 0x0042u32)
        .build()
        .unwrap()
}

fn sample_deliver_sm() -> Pdu {
    operations::deliver_sm()
        .sequence_number(2)
        .field("source_addr_ton", TypeOfNumber::International)
        .field("source_addr_npi", NumericPlanIndicator::Isdn)
        .field("source_addr", "16505551234")
        .field("dest_addr_ton", TypeOfNumber::International)
        .field("dest_addr_npi", NumericPlanIndicator::Isdn)
        .field("destination_addr", "17735554070")
        .field("short_message", &b"there is no spoon"[..])
        .tlv(Tag::ReceiptedMessageId, "msg0001")
        .tlv(Tag::MessageState, 2u32)
        .build()
        .unwrap()
}

fn bench_encode(c: &mut Criterion) {
    let submit = sample_submit_sm();
    let deliver = sample_deliver_sm();

    let mut group = c.benchmark_group("encode");
    group.bench_function("submit_sm", |b| {
        b.iter(|| black_box(&submit).to_bytes().unwrap())
    });
    group.bench_function("deliver_sm", |b| {
        b.iter(|| black_box(&deliver).to_bytes().unwrap())
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let submit = sample_submit_sm().to_bytes().unwrap();
    let deliver = sample_deliver_sm().to_bytes().unwrap();

    let mut group = c.benchmark_group("decode");
    group.bench_function("submit_sm", |b| {
        b.iter(|| Pdu::decode(black_box(&submit)).unwrap())
    });
    group.bench_function("deliver_sm", |b| {
        b.iter(|| Pdu::decode(black_box(&deliver)).unwrap())
    });
    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let deliver = sample_deliver_sm().to_bytes().unwrap();
    c.bench_function("round_trip/deliver_sm", |b| {
        b.iter(|| {
            Pdu::decode(black_box(&deliver))
                .unwrap()
                .to_bytes()
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_round_trip);
criterion_main!(benches);
