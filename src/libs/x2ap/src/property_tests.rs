//! Property-Based Tests for X2AP message encoding
//!
//! - Every typed message survives encode then decode unchanged
//! - Encoded output fits `encode_into` buffers of exactly its own length
//! - Re-encoding a decoded message reproduces the original octets
//! - Arbitrary input never panics the message decoder

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use x2ap_asn1c::x2ap::{
        Cause, CauseMisc, CauseProtocol, CauseRadioNetwork, CauseTransport, CountValue, ERabId,
        ERabsSubjectToStatusTransferItem, TimeToWait, UeX2apId,
    };

    use crate::types::*;
    use crate::{decode, encode, encode_into, X2apMessage};

    fn ue_x2ap_id() -> impl Strategy<Value = UeX2apId> {
        (0u16..=4095).prop_map(UeX2apId)
    }

    fn cause() -> impl Strategy<Value = Cause> {
        prop_oneof![
            (0..CauseRadioNetwork::ROOT.len()).prop_map(|i| Cause::RadioNetwork(CauseRadioNetwork::ROOT[i])),
            (0..CauseTransport::ROOT.len()).prop_map(|i| Cause::Transport(CauseTransport::ROOT[i])),
            (0..CauseProtocol::ROOT.len()).prop_map(|i| Cause::Protocol(CauseProtocol::ROOT[i])),
            (0..CauseMisc::ROOT.len()).prop_map(|i| Cause::Misc(CauseMisc::ROOT[i])),
        ]
    }

    fn count_value() -> impl Strategy<Value = CountValue> {
        (0u16..=4095, 0u32..=1_048_575).prop_map(|(pdcp_sn, hfn)| CountValue { pdcp_sn, hfn })
    }

    fn status_transfer_item() -> impl Strategy<Value = ERabsSubjectToStatusTransferItem> {
        (0u8..=15, count_value(), count_value()).prop_map(|(id, ul, dl)| {
            ERabsSubjectToStatusTransferItem {
                e_rab_id: ERabId(id),
                receive_status_of_ul_pdcp_sdus: None,
                ul_count_value: ul,
                dl_count_value: dl,
            }
        })
    }

    fn message() -> impl Strategy<Value = X2apMessage> {
        prop_oneof![
            (ue_x2ap_id(), ue_x2ap_id()).prop_map(|(old, new)| {
                X2apMessage::UeContextRelease(UeContextRelease {
                    old_enb_ue_x2ap_id: old,
                    new_enb_ue_x2ap_id: new,
                })
            }),
            (ue_x2ap_id(), proptest::option::of(ue_x2ap_id()), cause()).prop_map(|(old, new, cause)| {
                X2apMessage::HandoverCancel(HandoverCancel {
                    old_enb_ue_x2ap_id: old,
                    new_enb_ue_x2ap_id: new,
                    cause,
                })
            }),
            (
                proptest::option::of(ue_x2ap_id()),
                proptest::option::of(ue_x2ap_id()),
                proptest::option::of(cause()),
            )
                .prop_map(|(old, new, cause)| {
                    X2apMessage::ErrorIndication(ErrorIndication {
                        old_enb_ue_x2ap_id: old,
                        new_enb_ue_x2ap_id: new,
                        cause,
                        criticality_diagnostics: None,
                    })
                }),
            (
                ue_x2ap_id(),
                ue_x2ap_id(),
                proptest::collection::vec(status_transfer_item(), 1..=8),
            )
                .prop_map(|(old, new, items)| {
                    X2apMessage::SnStatusTransfer(SnStatusTransfer {
                        old_enb_ue_x2ap_id: old,
                        new_enb_ue_x2ap_id: new,
                        e_rabs_subject_to_status_transfer_list: items,
                    })
                }),
            (cause(), proptest::option::of(0..TimeToWait::ROOT.len())).prop_map(|(cause, ttw)| {
                X2apMessage::X2SetupFailure(X2SetupFailure {
                    cause,
                    time_to_wait: ttw.map(|i| TimeToWait::ROOT[i]),
                    criticality_diagnostics: None,
                })
            }),
            cause().prop_map(|cause| X2apMessage::ResetRequest(ResetRequest { cause })),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_message_roundtrip(msg in message()) {
            let bytes = encode(&msg).unwrap();
            let decoded = decode(&bytes).unwrap();
            prop_assert_eq!(&decoded, &msg);
            prop_assert_eq!(encode(&decoded).unwrap(), bytes);
        }

        #[test]
        fn prop_encode_into_exact_buffer(msg in message()) {
            let bytes = encode(&msg).unwrap();
            let mut buf = vec![0u8; bytes.len()];
            prop_assert_eq!(encode_into(&msg, &mut buf).unwrap(), bytes.len());
            prop_assert_eq!(&buf, &bytes);

            let mut short = vec![0u8; bytes.len() - 1];
            prop_assert!(encode_into(&msg, &mut short).is_err());
        }

        #[test]
        fn prop_decode_never_panics(data in proptest::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode(&data);
        }
    }
}
