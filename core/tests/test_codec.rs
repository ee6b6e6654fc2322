#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use nonceforge_core::{
        decrypt, encrypt, init, nonce, sortable_nonce, CipherChoice, CryptoError, FactoryError,
        InitOptions, NonceWidth,
    };

    const BASE: [u8; 32] = [0xAA; 32];

    fn keyed(name: &str) {
        init(InitOptions::new(0).name(name).base_key(BASE)).unwrap();
    }

    #[test]
    fn roundtrip_holds_for_block_matched_widths_and_both_variants() {
        // 96-bit inputs under the default (64-bit) cipher additionally
        // need their zero tail; they get their own case below
        keyed("cdc-roundtrip");
        for width in [NonceWidth::W64, NonceWidth::W128] {
            for plain in [
                nonce("cdc-roundtrip", width).unwrap(),
                sortable_nonce("cdc-roundtrip", width).unwrap(),
            ] {
                let c = encrypt("cdc-roundtrip", plain.as_bytes()).unwrap();
                assert_ne!(c, plain);
                assert_eq!(c.width(), width);
                let p = decrypt("cdc-roundtrip", c.as_bytes()).unwrap();
                assert_eq!(p, plain);
            }
        }
    }

    #[test]
    fn roundtrip_holds_under_triple_des() {
        init(
            InitOptions::new(0)
                .name("cdc-3des")
                .base_key(BASE)
                .cipher64(CipherChoice::TripleDes)
                .cipher96(CipherChoice::TripleDes),
        )
        .unwrap();

        let plain = nonce("cdc-3des", NonceWidth::W64).unwrap();
        let c = encrypt("cdc-3des", plain.as_bytes()).unwrap();
        assert_ne!(c, plain);
        assert_eq!(decrypt("cdc-3des", c.as_bytes()).unwrap(), plain);

        let mut padded = [0u8; 12];
        padded[..8].copy_from_slice(nonce("cdc-3des", NonceWidth::W64).unwrap().as_bytes());
        let c96 = encrypt("cdc-3des", &padded).unwrap();
        assert_eq!(&c96.as_bytes()[8..12], &[0u8; 4]);
        assert_eq!(decrypt("cdc-3des", c96.as_bytes()).unwrap().as_bytes(), padded);
    }

    #[test]
    fn encryption_is_injective_over_an_emitted_set() {
        keyed("cdc-inject");
        let mut ciphertexts = HashSet::new();
        for _ in 0..1_000 {
            let p = nonce("cdc-inject", NonceWidth::W64).unwrap();
            let c = encrypt("cdc-inject", p.as_bytes()).unwrap();
            ciphertexts.insert(c.to_vec());
        }
        assert_eq!(ciphertexts.len(), 1_000);
    }

    #[test]
    fn wrapped_96_bit_ciphertext_carries_a_zero_tail() {
        keyed("cdc-tail");
        let p = nonce("cdc-tail", NonceWidth::W96).unwrap();
        // counter nonces put their counter in the low bits, so only a
        // zero-tail plaintext is eligible under a 64-bit cipher
        let mut padded = [0u8; 12];
        padded[..8].copy_from_slice(&p.as_bytes()[..8]);
        let c = encrypt("cdc-tail", &padded).unwrap();
        assert_eq!(&c.as_bytes()[8..12], &[0u8; 4]);
        assert_eq!(decrypt("cdc-tail", c.as_bytes()).unwrap().as_bytes(), padded);
    }

    #[test]
    fn dirty_96_bit_tail_is_rejected() {
        keyed("cdc-dirty");
        let mut input = [0u8; 12];
        input[9] = 0x40;
        assert_eq!(
            encrypt("cdc-dirty", &input).unwrap_err(),
            FactoryError::Crypto(CryptoError::InvalidTail)
        );
        assert_eq!(
            decrypt("cdc-dirty", &input).unwrap_err(),
            FactoryError::Crypto(CryptoError::InvalidTail)
        );
    }

    #[test]
    fn unkeyed_factory_rejects_the_codec() {
        init(InitOptions::new(0).name("cdc-unkeyed")).unwrap();
        let p = nonce("cdc-unkeyed", NonceWidth::W64).unwrap();
        assert_eq!(
            encrypt("cdc-unkeyed", p.as_bytes()).unwrap_err(),
            FactoryError::Crypto(CryptoError::NoCipherConfigured {
                width: NonceWidth::W64
            })
        );
    }

    #[test]
    fn unknown_length_is_rejected() {
        keyed("cdc-length");
        assert_eq!(
            encrypt("cdc-length", &[0u8; 11]).unwrap_err(),
            FactoryError::InvalidNonceLength { len: 11 }
        );
    }

    #[test]
    fn override_keys_change_the_mapping() {
        init(
            InitOptions::new(0)
                .name("cdc-ovr-a")
                .base_key(BASE)
                .key64(vec![0x10u8; 16]),
        )
        .unwrap();
        init(
            InitOptions::new(0)
                .name("cdc-ovr-b")
                .base_key(BASE)
                .key64(vec![0x20u8; 16]),
        )
        .unwrap();

        let block = [1u8, 2, 3, 4, 5, 6, 7, 8];
        let ca = encrypt("cdc-ovr-a", &block).unwrap();
        let cb = encrypt("cdc-ovr-b", &block).unwrap();
        assert_ne!(ca, cb);
    }

    fn keyed_once() {
        static ONCE: std::sync::Once = std::sync::Once::new();
        ONCE.call_once(|| keyed("cdc-prop"));
    }

    proptest! {
        /// Any 64-bit block round-trips; bijectivity over the full block
        /// space is what keeps emitted nonces collision-free.
        #[test]
        fn prop_any_quadword_roundtrips(block in any::<[u8; 8]>()) {
            keyed_once();
            let c = encrypt("cdc-prop", &block).unwrap();
            let p = decrypt("cdc-prop", c.as_bytes()).unwrap();
            prop_assert_eq!(p.as_bytes(), &block);
        }

        #[test]
        fn prop_any_double_quadword_roundtrips(block in any::<[u8; 16]>()) {
            keyed_once();
            let c = encrypt("cdc-prop", &block).unwrap();
            let p = decrypt("cdc-prop", c.as_bytes()).unwrap();
            prop_assert_eq!(p.as_bytes(), &block);
        }
    }
}
