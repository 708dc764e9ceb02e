use criterion::{black_box, criterion_group, criterion_main, Criterion};
use card_number_field::{
    required_layout, CardFieldConfig, CardNumberController, InputEvent, RecordingHost, SegmentId,
};

fn bench_required_layout(c: &mut Criterion) {
    let numbers = ["4111111111111111", "378282246310005", "6011111111111117", "1234", "3"];

    c.bench_function("required_layout", |b| {
        b.iter(|| {
            for number in &numbers {
                black_box(required_layout(black_box(number)));
            }
        })
    });
}

fn bench_type_full_number(c: &mut Criterion) {
    c.bench_function("type_visa_digit_by_digit", |b| {
        b.iter(|| {
            let mut controller: CardNumberController<RecordingHost> =
                CardNumberController::with_host(CardFieldConfig::default(), RecordingHost::new())
                    .unwrap();
            for digit in "4111111111111111".chars() {
                let segment = controller
                    .focused()
                    .unwrap_or_else(|| SegmentId::first(controller.active_layout()));
                let mut text = controller.segment(segment).unwrap().text().to_string();
                text.push(digit);
                controller
                    .handle_event(InputEvent::EditingChanged { segment, text })
                    .unwrap();
            }
            black_box(controller.card_number())
        })
    });
}

fn bench_set_card_number(c: &mut Criterion) {
    c.bench_function("set_card_number_amex", |b| {
        let mut controller: CardNumberController<RecordingHost> = CardNumberController::default();
        b.iter(|| black_box(controller.set_card_number(black_box("378282246310005"))))
    });
}

criterion_group!(benches, bench_required_layout, bench_type_full_number, bench_set_card_number);
criterion_main!(benches);
