//! End-to-end call sequences: generate key → encrypt → MAC → verify → decrypt.

use std::collections::HashSet;
use std::sync::Arc;

use sealkit::crypto::{cbc, gcm, mac};
use sealkit::{
    generate_iv, generate_key, generate_nonce, purpose, CbcEnvelope, CbcKey, CryptoError,
    GcmEnvelope, MacKey, SealedMessage, Settings, Toolkit,
};

#[test]
fn cbc_with_all_zero_key_encrypt_mac_verify_decrypt() {
    // Key content is not validated, only its length.
    let key = CbcKey::from_bytes(vec![0u8; 32]);
    let mac_key = generate_key::<purpose::Mac>(256).unwrap();
    let plaintext = b"This is the CBC test";

    let envelope = cbc::encrypt(plaintext, &key).unwrap();
    let tag = mac::tag_envelope(&envelope, &mac_key).unwrap();

    assert!(mac::verify_envelope(&envelope, &mac_key, tag.as_bytes()));
    let decrypted = cbc::decrypt(envelope, &key).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn cbc_corrupted_mac_is_refused_before_decryption() {
    let key = CbcKey::from_bytes(vec![0u8; 32]);
    let mac_key = generate_key::<purpose::Mac>(256).unwrap();
    let envelope = cbc::encrypt(b"This is the CBC test", &key).unwrap();
    let tag = mac::tag_envelope(&envelope, &mac_key).unwrap();

    for i in 0..tag.as_bytes().len() {
        let mut corrupted = tag.to_bytes();
        corrupted[i] ^= 0xFF;
        assert!(!mac::verify_envelope(&envelope, &mac_key, &corrupted), "byte {i}");
        let err = cbc::decrypt_verified(envelope.clone(), &corrupted, &key, &mac_key).unwrap_err();
        assert!(matches!(err, CryptoError::AuthenticationFailure));
    }
}

#[test]
fn gcm_round_trip_and_wrong_key() {
    let key = generate_key::<purpose::Gcm>(256).unwrap();
    let plaintext = b"This is the GCM test";

    let envelope = gcm::encrypt(plaintext, &key).unwrap();
    assert_eq!(gcm::decrypt(envelope.clone(), &key).unwrap(), plaintext);

    let other = generate_key::<purpose::Gcm>(256).unwrap();
    let err = gcm::decrypt(envelope, &other).unwrap_err();
    assert!(matches!(err, CryptoError::AuthenticationFailure));
    assert_eq!(err.public_message(), "message rejected");
}

#[test]
fn generated_material_sizes() {
    assert_eq!(generate_key::<purpose::Cbc>(256).unwrap().len(), 32);
    assert_eq!(generate_iv().unwrap().to_bytes().len(), 16);
    assert_eq!(generate_nonce().unwrap().to_bytes().len(), 12);
}

#[test]
fn ivs_and_nonces_do_not_repeat() {
    let ivs: HashSet<[u8; 16]> = (0..5000).map(|_| generate_iv().unwrap().to_bytes()).collect();
    assert_eq!(ivs.len(), 5000);
    let nonces: HashSet<[u8; 12]> = (0..5000)
        .map(|_| generate_nonce().unwrap().to_bytes())
        .collect();
    assert_eq!(nonces.len(), 5000);
}

#[test]
fn envelopes_survive_json_transport() {
    let kit = Toolkit::new(&Settings::default());
    let key = kit.cbc_key().unwrap();
    let mac_key: MacKey = kit.mac_key().unwrap();
    let (envelope, tag) = kit.seal_cbc(b"over the wire", &key, &mac_key).unwrap();

    let json = envelope.to_message(Some(&tag)).to_json().unwrap();
    let msg = SealedMessage::from_json(&json).unwrap();
    let (received, received_tag) = CbcEnvelope::from_message(&msg).unwrap();
    let received_tag = received_tag.unwrap();
    assert_eq!(received_tag, tag);

    let pt = kit
        .open_cbc(received, received_tag.as_bytes(), &key, &mac_key)
        .unwrap();
    assert_eq!(pt, b"over the wire");

    let gcm_key = kit.gcm_key().unwrap();
    let sealed = kit.seal_gcm(b"also over the wire", &gcm_key).unwrap();
    let bytes = sealed.to_bytes();
    let pt = kit
        .open_gcm(GcmEnvelope::from_bytes(&bytes).unwrap(), &gcm_key)
        .unwrap();
    assert_eq!(pt, b"also over the wire");
}

#[test]
fn concurrent_callers_share_nothing() {
    let kit = Arc::new(Toolkit::new(&Settings::default()));
    let key = Arc::new(kit.gcm_key().unwrap());
    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let kit = Arc::clone(&kit);
            let key = Arc::clone(&key);
            std::thread::spawn(move || {
                let plaintext = vec![i; 64];
                let env = kit.seal_gcm(&plaintext, &key).unwrap();
                let nonce = env.nonce().to_bytes();
                assert_eq!(kit.open_gcm(env, &key).unwrap(), plaintext);
                nonce
            })
        })
        .collect();
    let nonces: HashSet<[u8; 12]> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(nonces.len(), 8);
}
