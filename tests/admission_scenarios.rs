use framegate::{
    decide, evaluate, ErrorKind, Evaluation, FrameGateError, ImageView, MemoryTemplateSource,
    Template, TemplateStore, Verdict,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WIDTH: usize = 40;
const HEIGHT: usize = 30;

fn noise(seed: u64, width: usize, height: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height).map(|_| rng.random::<u8>()).collect()
}

fn paste(image: &mut [u8], img_width: usize, patch: &[u8], pw: usize, x0: usize, y0: usize) {
    for (y, row) in patch.chunks_exact(pw).enumerate() {
        let start = (y0 + y) * img_width + x0;
        image[start..start + pw].copy_from_slice(row);
    }
}

fn gray_block_store(threshold: f32) -> TemplateStore {
    let tpl = Template::new("gray", vec![128u8; 16], 4, 4).unwrap();
    TemplateStore::from_templates(vec![tpl], threshold).unwrap()
}

#[test]
fn uniform_block_in_noise_is_dropped() {
    let store = gray_block_store(0.7);
    let mut frame = noise(1, WIDTH, HEIGHT);
    paste(&mut frame, WIDTH, &[128u8; 16], 4, 10, 10);

    let view = ImageView::from_slice(&frame, WIDTH, HEIGHT).unwrap();
    assert_eq!(decide(view, &store).unwrap(), Verdict::Drop);

    let decision = evaluate(view, &store, Evaluation::AllTemplates).unwrap();
    let hit = decision.trigger(store.threshold()).unwrap();
    assert_eq!((hit.result.x, hit.result.y), (10, 10));
}

#[test]
fn pure_noise_is_admitted() {
    let store = gray_block_store(0.7);
    let frame = noise(2, WIDTH, HEIGHT);
    let view = ImageView::from_slice(&frame, WIDTH, HEIGHT).unwrap();
    assert_eq!(decide(view, &store).unwrap(), Verdict::Admit);
}

#[test]
fn second_template_match_drops_regardless_of_order() {
    let mut frame = noise(3, WIDTH, HEIGHT);
    let present = noise(30, 8, 6);
    paste(&mut frame, WIDTH, &present, 8, 21, 14);
    // A template whose pattern is not in the frame scores well below 0.9.
    let absent = Template::new("absent", noise(31, 8, 6), 8, 6).unwrap();
    let present = Template::new("present", present, 8, 6).unwrap();

    let view = ImageView::from_slice(&frame, WIDTH, HEIGHT).unwrap();
    for templates in [
        vec![absent.clone(), present.clone()],
        vec![present.clone(), absent.clone()],
    ] {
        let store = TemplateStore::from_templates(templates, 0.9).unwrap();
        assert_eq!(decide(view, &store).unwrap(), Verdict::Drop);
    }

    let store = TemplateStore::from_templates(vec![absent, present], 0.9).unwrap();
    let decision = evaluate(view, &store, Evaluation::AllTemplates).unwrap();
    assert_eq!(decision.scores.len(), 2);
    assert!(decision.scores[0].result.score < 0.9);
    assert!(decision.scores[1].result.score > 0.99);
    assert_eq!(decision.trigger(0.9).unwrap().index, 1);
}

#[test]
fn empty_template_configuration_fails_at_initialization() {
    let source = MemoryTemplateSource::new();
    let err = TemplateStore::load_list(&source, "", 0.7).unwrap_err();
    assert_eq!(err, FrameGateError::EmptyTemplateList);
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let err = TemplateStore::from_templates(Vec::new(), 0.7).unwrap_err();
    assert_eq!(err, FrameGateError::EmptyTemplateList);
}

#[test]
fn zero_threshold_drops_every_frame() {
    let textured = Template::new("t", noise(40, 5, 5), 5, 5).unwrap();
    let textured_store = TemplateStore::from_templates(vec![textured], 0.0).unwrap();
    let flat_store = gray_block_store(0.0);

    for seed in 50..55 {
        let frame = noise(seed, WIDTH, HEIGHT);
        let view = ImageView::from_slice(&frame, WIDTH, HEIGHT).unwrap();
        assert_eq!(decide(view, &textured_store).unwrap(), Verdict::Drop);
        assert_eq!(decide(view, &flat_store).unwrap(), Verdict::Drop);
    }
}

#[test]
fn template_larger_than_frame_fails_each_frame() {
    let tpl = Template::new("big", noise(60, 8, 8), 8, 8).unwrap();
    let store = TemplateStore::from_templates(vec![tpl], 0.7).unwrap();

    for seed in 0..3 {
        let frame = noise(seed, 6, 6);
        let view = ImageView::from_slice(&frame, 6, 6).unwrap();
        let err = decide(view, &store).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Match);
    }
}

#[test]
fn failure_is_not_masked_by_an_earlier_miss() {
    let small = Template::new("small", noise(70, 3, 3), 3, 3).unwrap();
    let big = Template::new("big", noise(71, 9, 9), 9, 9).unwrap();
    let store = TemplateStore::from_templates(vec![small, big], 1.0).unwrap();

    let frame = noise(72, 8, 8);
    let view = ImageView::from_slice(&frame, 8, 8).unwrap();
    assert!(matches!(
        decide(view, &store),
        Err(FrameGateError::TemplateLargerThanFrame { .. })
    ));
}

#[test]
fn raising_threshold_only_turns_drop_into_admit() {
    let mut frame = noise(80, WIDTH, HEIGHT);
    let patch = noise(81, 5, 5);
    // A slightly perturbed copy scores high but below 1.0.
    let perturbed: Vec<u8> = patch
        .iter()
        .enumerate()
        .map(|(i, &v)| if i % 7 == 0 { v.wrapping_add(60) } else { v })
        .collect();
    paste(&mut frame, WIDTH, &perturbed, 5, 3, 4);
    let view = ImageView::from_slice(&frame, WIDTH, HEIGHT).unwrap();

    let mut seen_admit = false;
    for step in 0..=20 {
        let threshold = step as f32 / 20.0;
        let tpl = Template::new("p", patch.clone(), 5, 5).unwrap();
        let store = TemplateStore::from_templates(vec![tpl], threshold).unwrap();
        let verdict = decide(view, &store).unwrap();
        if seen_admit {
            assert_eq!(verdict, Verdict::Admit, "threshold {threshold}");
        }
        seen_admit |= verdict == Verdict::Admit;
    }
    assert!(seen_admit);
}

#[test]
fn first_match_mode_stops_at_the_trigger() {
    let mut frame = noise(90, WIDTH, HEIGHT);
    let patch = noise(91, 4, 4);
    paste(&mut frame, WIDTH, &patch, 4, 0, 0);
    let hit = Template::new("hit", patch, 4, 4).unwrap();
    let other = Template::new("other", noise(92, 4, 4), 4, 4).unwrap();
    let store = TemplateStore::from_templates(vec![hit, other], 0.9).unwrap();

    let view = ImageView::from_slice(&frame, WIDTH, HEIGHT).unwrap();
    let first = evaluate(view, &store, Evaluation::FirstMatch).unwrap();
    let all = evaluate(view, &store, Evaluation::AllTemplates).unwrap();
    assert_eq!(first.verdict, Verdict::Drop);
    assert_eq!(all.verdict, Verdict::Drop);
    assert_eq!(first.scores.len(), 1);
    assert_eq!(all.scores.len(), 2);
}
