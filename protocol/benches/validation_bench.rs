// Validation benchmarks for the txguard protocol library.
//
// Covers single-record validation for common transaction types, flag
// canonicalization, batches of growing size, and the metadata codec.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

use txguard_protocol::flags::{decode_flags, encode_flags};
use txguard_protocol::metadata::{decode_mpt_metadata, encode_mpt_metadata, lint_mpt_metadata};
use txguard_protocol::{canonicalize, validate, TransactionType};

const ALICE: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
const BOB: &str = "rfmDuhDyLGgx94qiwf3YF8BUV5j6KSvE8";
const ISSUER: &str = "rLUEXYuLiQptky37CqLcm9USQpPiz5rkpD";

fn payment() -> Value {
    json!({
        "TransactionType": "Payment",
        "Account": ALICE,
        "Destination": BOB,
        "Amount": {"currency": "USD", "issuer": ISSUER, "value": "125.50"},
        "SendMax": {"currency": "USD", "issuer": ISSUER, "value": "130"},
        "Fee": "12",
        "Sequence": 42,
        "Flags": {"tfPartialPayment": true},
        "Memos": [{"Memo": {"MemoType": "696E766F696365", "MemoData": "3432"}}],
    })
}

fn offer_create() -> Value {
    json!({
        "TransactionType": "OfferCreate",
        "Account": ALICE,
        "TakerGets": "1000000",
        "TakerPays": {"currency": "USD", "issuer": ISSUER, "value": "1.5"},
        "Fee": "12",
        "Sequence": 7,
        "Flags": {"tfSell": true, "tfPassive": true},
    })
}

fn inner_payment(sequence: u64) -> Value {
    json!({
        "RawTransaction": {
            "TransactionType": "Payment",
            "Account": ALICE,
            "Destination": BOB,
            "Amount": "1000",
            "Sequence": sequence,
            "Fee": "0",
            "SigningPubKey": "",
            "Flags": 0x4000_0000u32,
        }
    })
}

fn metadata_document() -> Value {
    json!({
        "ticker": "TBILL",
        "name": "T-Bill Yield Token",
        "icon": "https://example.org/tbill-icon.png",
        "asset_class": "rwa",
        "asset_subclass": "treasury",
        "issuer_name": "Example Yield Co.",
        "uris": [
            {"uri": "https://exampleyield.co/tbill", "category": "website", "title": "Product Page"}
        ],
        "additional_info": {"interest_rate": "5.00%"}
    })
}

fn bench_validate_payment(c: &mut Criterion) {
    let tx = payment();
    c.bench_function("validate/payment", |b| {
        b.iter(|| validate(&tx).unwrap());
    });
}

fn bench_validate_offer(c: &mut Criterion) {
    let tx = offer_create();
    c.bench_function("validate/offer_create", |b| {
        b.iter(|| validate(&tx).unwrap());
    });
}

fn bench_canonicalize(c: &mut Criterion) {
    let tx = offer_create();
    c.bench_function("canonicalize/offer_create", |b| {
        b.iter(|| canonicalize(&tx).unwrap());
    });
}

fn bench_flags(c: &mut Criterion) {
    let named = [("tfPartialPayment", true), ("tfLimitQuality", true)];

    c.bench_function("flags/encode_payment", |b| {
        b.iter(|| encode_flags(named.iter().copied(), TransactionType::Payment).unwrap());
    });
    c.bench_function("flags/decode_payment", |b| {
        b.iter(|| decode_flags(0x0006_0000, TransactionType::Payment));
    });
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate/batch");

    for size in [2usize, 4, 8] {
        let tx = json!({
            "TransactionType": "Batch",
            "Account": ALICE,
            "Fee": "40",
            "Sequence": 100,
            "Flags": {"tfAllOrNothing": true},
            "RawTransactions": (0..size).map(|i| inner_payment(101 + i as u64)).collect::<Vec<_>>(),
        });

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &tx, |b, tx| {
            b.iter(|| validate(tx).unwrap());
        });
    }

    group.finish();
}

fn bench_metadata(c: &mut Criterion) {
    let document = metadata_document();
    let encoded = encode_mpt_metadata(&document).unwrap();

    c.bench_function("metadata/encode", |b| {
        b.iter(|| encode_mpt_metadata(&document).unwrap());
    });
    c.bench_function("metadata/decode", |b| {
        b.iter(|| decode_mpt_metadata(&encoded).unwrap());
    });
    c.bench_function("metadata/lint", |b| {
        b.iter(|| lint_mpt_metadata(&encoded));
    });
}

criterion_group!(
    benches,
    bench_validate_payment,
    bench_validate_offer,
    bench_canonicalize,
    bench_flags,
    bench_batch,
    bench_metadata,
);
criterion_main!(benches);
