use super::{ports, test_nic};
use crate::nic::{ForwardingEngine, LineOutcome};
use crate::packet::{L2Packet, L3Packet, L4Segment, MemoryDest};

fn engine() -> ForwardingEngine {
    ForwardingEngine::new(test_nic(), ports(&[(80, 80), (1, 2)]))
}

#[test]
fn l4_record_lands_in_local_memory() {
    let mut eng = engine();
    let out = eng.handle_line(1, "80|80|0|de ad be ef");
    assert_eq!(out, LineOutcome::Stored(MemoryDest::LocalMemory));
    assert_eq!(&eng.ports().find(80, 80).expect("port").data()[..4], &[0xde, 0xad, 0xbe, 0xef]);
    assert!(eng.reception_queue().is_empty());
    assert!(eng.transmission_queue().is_empty());
    assert_eq!(eng.stats.local, 1);
}

#[test]
fn for_me_without_open_port_is_dropped() {
    let mut eng = engine();
    let pkt = L3Packet::with_valid_checksum(
        "1.2.3.4".parse().expect("ip"),
        "10.0.0.5".parse().expect("ip"),
        5,
        L4Segment::new(4000, 4000, 0, vec![1, 2]),
    );
    assert_eq!(eng.handle_line(1, &pkt.serialize()), LineOutcome::Dropped);
    assert!(eng.reception_queue().is_empty());
    assert!(eng.transmission_queue().is_empty());
}

#[test]
fn incoming_record_is_queued_with_new_ttl_and_checksum() {
    let mut eng = engine();
    let out = eng.handle_line(1, "192.168.1.1|10.0.0.7|2|385|1|2|0|01");
    assert_eq!(out, LineOutcome::Stored(MemoryDest::ReceptionQueue));
    assert_eq!(eng.reception_queue(), ["192.168.1.1|10.0.0.7|1|384|1|2|0|01"]);
}

#[test]
fn frame_for_another_mac_is_rejected() {
    let mut eng = engine();
    let l3: L3Packet = "1.2.3.4|10.0.0.5|5|1014|80|80|0|de ad be ef".parse().expect("l3");
    let frame = L2Packet::with_valid_checksum(
        "00:00:00:00:00:01".parse().expect("mac"),
        "00:00:00:00:00:02".parse().expect("mac"),
        l3,
    );
    assert_eq!(eng.handle_line(1, &frame.to_string()), LineOutcome::Rejected);
    assert!(eng.ports().find(80, 80).expect("port").data().iter().all(|b| *b == 0));
    assert_eq!(eng.stats.rejected, 1);
}

#[test]
fn transit_with_ttl_one_is_dropped() {
    let mut eng = engine();
    assert_eq!(eng.handle_line(1, "1.1.1.1|2.2.2.2|1|15|1|1|0|00"), LineOutcome::Dropped);
    assert!(eng.transmission_queue().is_empty());
}

#[test]
fn blank_and_malformed_lines_are_skipped() {
    let mut eng = engine();
    assert_eq!(eng.handle_line(1, ""), LineOutcome::Blank);
    assert_eq!(eng.handle_line(2, "\r"), LineOutcome::Blank);
    assert_eq!(eng.handle_line(3, "garbage"), LineOutcome::Malformed);
    assert_eq!(eng.handle_line(4, "80|80|zero|00"), LineOutcome::Malformed);
    assert_eq!(eng.stats.lines, 2);
    assert_eq!(eng.stats.malformed, 2);
}

#[test]
fn run_preserves_input_order_in_queues() {
    let mut eng = engine();
    let a = L3Packet::with_valid_checksum(
        "1.1.1.1".parse().expect("ip"),
        "2.2.2.2".parse().expect("ip"),
        9,
        L4Segment::new(1, 1, 0, vec![0xaa]),
    );
    let b = L3Packet::with_valid_checksum(
        "3.3.3.3".parse().expect("ip"),
        "4.4.4.4".parse().expect("ip"),
        9,
        L4Segment::new(1, 1, 0, vec![0xbb]),
    );
    let c = L3Packet::with_valid_checksum(
        "10.0.0.77".parse().expect("ip"),
        "9.9.9.9".parse().expect("ip"),
        9,
        L4Segment::new(1, 1, 0, vec![0xcc]),
    );
    let lines = [a.serialize(), String::new(), b.serialize(), c.serialize()];
    eng.run(&lines);

    let tq = eng.transmission_queue();
    assert_eq!(tq.len(), 3);
    assert!(tq[0].starts_with("1.1.1.1|2.2.2.2|8|"));
    assert!(tq[1].starts_with("3.3.3.3|4.4.4.4|8|"));
    assert!(tq[2].starts_with("10.0.0.5|9.9.9.9|8|"));
    assert!(tq[2].ends_with("|cc"));
    assert_eq!(eng.stats.to_tq, 3);
    assert_eq!(eng.stats.lines, 3);
}

#[test]
fn run_reader_processes_lines_from_a_reader() {
    let mut eng = engine();
    let input = "80|80|0|01 02\n\n80|80|2|03\nnope\n1|2|18|ff ff ff\n";
    eng.run_reader(input.as_bytes()).expect("read");
    assert_eq!(&eng.ports().find(80, 80).expect("port").data()[..3], &[1, 2, 3]);
    assert_eq!(eng.stats.local, 2);
    assert_eq!(eng.stats.malformed, 1);
    // 18 + 3 > 20
    assert_eq!(eng.stats.dropped, 1);
}

#[test]
fn queued_packets_reparse_to_valid_packets() {
    let mut eng = engine();
    eng.handle_line(1, "192.168.1.1|10.0.0.7|2|385|1|2|0|01");
    let queued: L3Packet = eng.reception_queue()[0].parse().expect("reparse");
    assert!(queued.validate());
}

#[test]
fn invalid_utf8_line_is_skipped_without_ending_the_run() {
    let mut eng = engine();
    let input: &[u8] = b"80|80|0|01\n\xff\xfe|garbage\n80|80|1|02\n";
    eng.run_reader(input).expect("read");
    assert_eq!(&eng.ports().find(80, 80).expect("port").data()[..2], &[1, 2]);
    assert_eq!(eng.stats.lines, 3);
    assert_eq!(eng.stats.malformed, 1);
    assert_eq!(eng.stats.local, 2);
}

#[test]
fn whitespace_only_lines_count_as_blank() {
    let mut eng = engine();
    assert_eq!(eng.handle_line(1, "   "), LineOutcome::Blank);
    assert_eq!(eng.handle_line(2, "\t \r"), LineOutcome::Blank);
    assert_eq!(eng.stats.lines, 0);
    assert_eq!(eng.stats.malformed, 0);
}
