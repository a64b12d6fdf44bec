use super::*;
use super::super::parser::parse;

mod canonical {
    use super::*;

    #[test]
    fn keyword_projection() {
        let cases = vec![
            (Qualifier::Type(Type::Host), "host"),
            (Qualifier::Type(Type::Net), "net"),
            (Qualifier::Type(Type::Port), "port"),
            (Qualifier::Dir(Direction::Src), "src"),
            (Qualifier::Dir(Direction::Dst), "dst"),
            (Qualifier::Proto(Protocol::Tcp), "tcp"),
            (Qualifier::Proto(Protocol::Udp), "udp"),
        ];

        for (qualifier, keyword) in cases {
            assert_eq!(Some(keyword), qualifier.canonical_str());
        }
    }

    #[test]
    fn ether_has_no_projection() {
        assert_eq!(None, Qualifier::Proto(Protocol::Ether).canonical_str());
    }
}

mod matching {
    use super::*;

    #[test]
    fn same_value_matches() {
        let a = Qualifier::Type(Type::Host);
        let b = Qualifier::Type(Type::Host);
        assert!(a.matches(&b));
    }

    #[test]
    fn same_class_different_value_differs() {
        assert!(!Qualifier::Type(Type::Host).matches(&Qualifier::Type(Type::Net)));
        assert!(!Qualifier::Dir(Direction::Src).matches(&Qualifier::Dir(Direction::Dst)));
        assert!(!Qualifier::Proto(Protocol::Tcp).matches(&Qualifier::Proto(Protocol::Udp)));
    }

    #[test]
    fn different_classes_never_contradict() {
        // a type-only qualifier carries no direction and vice versa, so
        // neither side is contradicted
        let qtype = Qualifier::Type(Type::Host);
        let dir = Qualifier::Dir(Direction::Dst);
        let proto = Qualifier::Proto(Protocol::Tcp);

        assert!(qtype.matches(&dir));
        assert!(dir.matches(&qtype));
        assert!(qtype.matches(&proto));
        assert!(proto.matches(&dir));
    }

    #[test]
    fn symmetric() {
        let a = Qualifier::Type(Type::Port);
        let b = Qualifier::Dir(Direction::Src);
        assert_eq!(a.matches(&b), b.matches(&a));
    }
}

mod aggregation {
    use super::*;

    #[test]
    fn shared_id_lands_under_every_qualifier() {
        let filter = parse("dst host 192.168.1.10 and tcp 80 and dst 25.25.10.10").unwrap();
        let map = filter.qualifiers();

        assert_eq!(3, map.len());
        assert_eq!(vec!["192.168.1.10".to_string()], map["host"]);
        assert_eq!(
            vec!["192.168.1.10".to_string(), "25.25.10.10".to_string()],
            map["dst"],
        );
        assert_eq!(vec!["80".to_string()], map["tcp"]);
    }

    #[test]
    fn single_primitive() {
        let filter = parse("port 80").unwrap();
        let map = filter.qualifiers();

        assert_eq!(1, map.len());
        assert_eq!(vec!["80".to_string()], map["port"]);
    }

    #[test]
    fn duplicates_preserved_in_order() {
        let filter = parse("port 80 and port 443 and port 80").unwrap();
        let map = filter.qualifiers();

        assert_eq!(
            vec!["80".to_string(), "443".to_string(), "80".to_string()],
            map["port"],
        );
    }

    #[test]
    fn ether_contributes_no_key() {
        let filter = parse("ether dst af:").unwrap();
        let map = filter.qualifiers();

        assert_eq!(1, map.len());
        assert_eq!(vec!["af:".to_string()], map["dst"]);
    }

    #[test]
    fn expression_and_filter_agree() {
        let filter = parse("src 1.2.3.4 or dst 5.6.7.8").unwrap();
        assert_eq!(filter.expression().qualifiers(), filter.qualifiers());
    }
}
