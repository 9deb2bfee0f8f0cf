use qrune::QR;

fn decode(qr: &QR) -> (usize, String) {
    let img = qr.render(8);
    let (w, h) = img.dimensions();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(w as usize, h as usize, |x, y| {
        img.get_pixel(x as u32, y as u32).0[0]
    });
    let grids = prepared.detect_grids();
    assert_eq!(grids.len(), 1, "Expected exactly one symbol in the rendered image");
    let (meta, content) = grids[0].decode().expect("Failed to read QR");
    (meta.version.0, content)
}

mod qr_round_trip_tests {
    use test_case::test_case;

    use super::decode;
    use qrune::{ECLevel, MaskPattern, QRBuilder, Version};

    #[test_case("HELLO WORLD".to_string(), 1, ECLevel::Q; "alphanumeric v1")]
    #[test_case("12345".to_string(), 1, ECLevel::L; "numeric v1")]
    #[test_case("Hello, world!".to_string(), 1, ECLevel::M; "byte v1")]
    #[test_case("A/B-C:D".to_string(), 1, ECLevel::H; "alphanumeric punctuation v1")]
    #[test_case("86753098675309867530".to_string(), 2, ECLevel::H; "numeric v2 high")]
    #[test_case("1234567890".repeat(15), 7, ECLevel::H; "numeric v7")]
    #[test_case("A11111111111111".repeat(11), 7, ECLevel::M; "alphanumeric v7")]
    #[test_case("a".repeat(200), 10, ECLevel::M; "byte v10")]
    #[test_case("1234567890".repeat(145), 27, ECLevel::H; "numeric v27")]
    #[test_case("1234567890".repeat(305), 40, ECLevel::H; "numeric v40")]
    fn test_round_trip(data: String, exp_version: usize, ecl: ECLevel) {
        let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
        assert_eq!(*qr.version() as usize, exp_version);

        let (version, content) = decode(&qr);
        assert_eq!(version, exp_version);
        assert_eq!(content, data);
    }

    #[test]
    fn test_round_trip_explicit_version() {
        let qr = QRBuilder::new(b"TEST")
            .version(Version::new(2))
            .ec_level(ECLevel::M)
            .build()
            .unwrap();
        let (version, content) = decode(&qr);
        assert_eq!(version, 2);
        assert_eq!(content, "TEST");
    }

    #[test]
    fn test_round_trip_every_mask() {
        for m in 0..8 {
            let qr = QRBuilder::new(b"MASKED")
                .ec_level(ECLevel::Q)
                .mask(MaskPattern::new(m))
                .build()
                .unwrap();
            let (_, content) = decode(&qr);
            assert_eq!(content, "MASKED", "Mask {m} did not round-trip");
        }
    }

    #[test]
    fn test_round_trip_boundary_capacity() {
        // Exactly the version 1-H alphanumeric capacity must stay version 1
        let data = "ABCDE12345";
        let qr = QRBuilder::new(data.as_bytes()).ec_level(ECLevel::H).build().unwrap();
        assert_eq!(*qr.version(), 1);
        let (version, content) = decode(&qr);
        assert_eq!(version, 1);
        assert_eq!(content, data);
    }

    #[test]
    #[should_panic]
    fn test_data_overflow() {
        let data = "1234567890".repeat(306);
        QRBuilder::new(data.as_bytes())
            .version(Version::new(40))
            .ec_level(ECLevel::H)
            .build()
            .unwrap();
    }
}

mod qr_proptests {
    use prop::string::string_regex;
    use proptest::prelude::*;

    use super::decode;
    use qrune::{ECLevel, QRBuilder};

    pub fn ec_level_strategy() -> BoxedStrategy<ECLevel> {
        prop_oneof![Just(ECLevel::L), Just(ECLevel::M), Just(ECLevel::Q), Just(ECLevel::H)].boxed()
    }

    pub fn qr_strategy(regex: String) -> impl Strategy<Value = (ECLevel, String)> {
        ec_level_strategy().prop_flat_map(move |ecl| {
            let pattern = format!(r"{}{{1,300}}", regex);
            string_regex(&pattern).unwrap().prop_map(move |data| (ecl, data))
        })
    }

    proptest! {
        #[test]
        #[ignore]
        fn proptest_numeric(params in qr_strategy("[0-9]".to_string())) {
            let (ecl, data) = params;

            let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
            let (_, decoded) = decode(&qr);

            prop_assert_eq!(data, decoded);
        }

        #[test]
        #[ignore]
        fn proptest_alphanumeric(params in qr_strategy(r"[0-9A-Z $%*+\-./:]".to_string())) {
            let (ecl, data) = params;

            let qr = QRBuilder::new(data.as_bytes()).ec_level(ecl).build().unwrap();
            let (_, decoded) = decode(&qr);

            prop_assert_eq!(data, decoded);
        }
    }
}
