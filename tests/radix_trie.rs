mod common {
    use std::io::Write;

    pub fn init() {
        let _ = env_logger::builder()
            .format(|buf, record| writeln!(buf, "{}", record.args()))
            .is_test(true)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use bgpsim_store::addr::Prefix;
    use bgpsim_store::errors::PrefixTrieError;
    use bgpsim_store::test_types::PrefixAs;
    use bgpsim_store::{Ipv4Prefix, RadixTrie};

    use std::error::Error;
    use std::net::{IpAddr, Ipv4Addr};
    use std::str::FromStr;

    // Checks every (address, expected value, expected prefix) triple.
    fn check_queries<V: std::fmt::Debug + PartialEq>(
        trie: &RadixTrie<V>,
        cases: &[(&str, V, &str)],
    ) -> Result<(), Box<dyn Error>> {
        for (addr, value, prefix) in cases {
            let m = trie.query(addr.parse()?);
            assert!(m.found(), "no match for {}", addr);
            assert_eq!(m.value(), Some(value), "value for {}", addr);
            assert_eq!(
                m.prefix().map(|p| p.to_string()).as_deref(),
                Some(*prefix),
                "prefix for {}",
                addr
            );
        }
        Ok(())
    }

    #[test]
    fn test_basic() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert("114.51.4.0/24".parse()?, 1919810);
        check_queries(&trie, &[("114.51.4.1", 1919810, "114.51.4.0/24")])?;
        trie.validate()?;
        Ok(())
    }

    #[test]
    fn test_update() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        let pfx: Ipv4Prefix = "10.0.0.0/8".parse()?;
        let addr: Ipv4Addr = "10.0.0.1".parse()?;

        assert_eq!(trie.insert(pfx, 100), None);
        assert_eq!(trie.query(addr).value(), Some(&100));

        assert_eq!(trie.insert(pfx, 200), Some(100));
        assert_eq!(trie.query(addr).value(), Some(&200));
        assert_eq!(trie.len(), 1);
        Ok(())
    }

    #[test]
    fn test_no_match() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        assert!(!trie.query("114.51.4.0".parse()?).found());

        trie.insert("192.168.0.0/16".parse()?, 1);
        let m = trie.query("10.0.0.1".parse()?);
        assert!(!m.found());
        assert_eq!(m.prefix(), None);
        assert_eq!(m.value(), None);
        Ok(())
    }

    #[test]
    fn test_insert_query() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        for (pfx, value) in [
            ("0.0.0.0/0", "default"),
            ("10.0.0.0/8", "private-10"),
            ("10.1.0.0/16", "private-10-1"),
            ("10.1.5.0/24", "private-10-1-5"),
            ("192.168.1.0/24", "home-network"),
            ("192.168.1.1/32", "router-interface"),
        ] {
            trie.insert(pfx.parse()?, value);
        }
        trie.validate()?;
        println!("{}", trie);
        assert_eq!(trie.len(), 6);

        check_queries(
            &trie,
            &[
                ("192.168.1.1", "router-interface", "192.168.1.1/32"),
                ("192.168.1.2", "home-network", "192.168.1.0/24"),
                ("10.1.5.50", "private-10-1-5", "10.1.5.0/24"),
                ("10.1.4.99", "private-10-1", "10.1.0.0/16"),
                ("10.2.2.2", "private-10", "10.0.0.0/8"),
                ("8.8.8.8", "default", "0.0.0.0/0"),
            ],
        )
    }

    #[test]
    fn test_insert_shorter_prefixes() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert("223.5.5.5/32".parse()?, "p1");
        trie.insert("223.5.5.0/24".parse()?, "p2");
        trie.insert("223.5.0.0/16".parse()?, "p3");
        trie.validate()?;

        check_queries(
            &trie,
            &[
                ("223.5.5.5", "p1", "223.5.5.5/32"),
                ("223.5.5.1", "p2", "223.5.5.0/24"),
                ("223.5.1.1", "p3", "223.5.0.0/16"),
            ],
        )
    }

    #[test]
    fn test_insert_forks() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert("0.0.0.0/24".parse()?, "p1");
        trie.insert("0.0.1.0/24".parse()?, "p2");
        trie.insert("0.1.0.0/16".parse()?, "p3");
        trie.validate()?;

        check_queries(
            &trie,
            &[
                ("0.0.0.1", "p1", "0.0.0.0/24"),
                ("0.0.0.128", "p1", "0.0.0.0/24"),
                ("0.0.0.254", "p1", "0.0.0.0/24"),
                ("0.0.1.1", "p2", "0.0.1.0/24"),
                ("0.0.1.32", "p2", "0.0.1.0/24"),
                ("0.0.1.64", "p2", "0.0.1.0/24"),
                ("0.1.0.1", "p3", "0.1.0.0/16"),
                ("0.1.254.1", "p3", "0.1.0.0/16"),
                ("0.1.18.48", "p3", "0.1.0.0/16"),
            ],
        )?;
        assert!(!trie.query("0.2.0.0".parse()?).found());
        assert!(!trie.query("0.0.2.0".parse()?).found());
        Ok(())
    }

    #[test]
    fn test_lpm_hierarchy() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert("0.0.0.0/0".parse()?, "default");
        trie.insert("10.0.0.0/8".parse()?, "A");
        trie.insert("10.10.0.0/16".parse()?, "B");
        trie.insert("10.10.10.0/24".parse()?, "C");

        check_queries(
            &trie,
            &[
                ("10.10.10.5", "C", "10.10.10.0/24"),
                ("10.10.20.5", "B", "10.10.0.0/16"),
                ("10.20.0.1", "A", "10.0.0.0/8"),
                ("11.11.11.11", "default", "0.0.0.0/0"),
            ],
        )?;

        assert!(trie.delete("10.10.0.0/16".parse()?));
        trie.validate()?;
        check_queries(
            &trie,
            &[
                ("10.10.20.5", "A", "10.0.0.0/8"),
                ("10.10.10.5", "C", "10.10.10.0/24"),
            ],
        )
    }

    #[test]
    fn test_delete() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert("114.51.4.0/24".parse()?, 1919810);

        // A covering prefix is not an exact match.
        assert!(!trie.delete("114.51.0.0/16".parse()?));
        assert!(!trie.delete("114.51.4.0/25".parse()?));
        assert_eq!(trie.len(), 1);

        assert!(trie.delete("114.51.4.0/24".parse()?));
        assert_eq!(trie.len(), 0);
        assert!(trie.is_empty());
        assert!(!trie.delete("114.51.4.0/24".parse()?));
        trie.validate()?;
        Ok(())
    }

    #[test]
    fn test_delete_leaf() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert("192.168.1.0/24".parse()?, "Network 1");
        trie.insert("192.168.1.0/28".parse()?, "Network 2");
        assert_eq!(trie.query("192.168.1.10".parse()?).value(), Some(&"Network 2"));

        assert!(trie.delete("192.168.1.0/28".parse()?));
        trie.validate()?;
        assert_eq!(trie.query("192.168.1.10".parse()?).value(), Some(&"Network 1"));
        Ok(())
    }

    #[test]
    fn test_delete_with_sibling() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert("192.168.1.0/24".parse()?, "Network 1");
        trie.insert("192.168.1.0/28".parse()?, "Network 2");
        trie.insert("192.168.1.16/28".parse()?, "Network 3");

        assert!(trie.delete("192.168.1.0/28".parse()?));
        trie.validate()?;
        assert_eq!(trie.query("192.168.1.20".parse()?).value(), Some(&"Network 3"));
        assert_eq!(trie.query("192.168.1.10".parse()?).value(), Some(&"Network 1"));
        Ok(())
    }

    #[test]
    fn test_delete_covering_prefix() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert("192.168.1.0/24".parse()?, "Network 1");
        trie.insert("192.168.1.0/28".parse()?, "Network 2");
        trie.insert("192.168.1.16/28".parse()?, "Network 3");

        assert!(trie.delete("192.168.1.0/24".parse()?));
        trie.validate()?;
        assert_eq!(trie.query("192.168.1.10".parse()?).value(), Some(&"Network 2"));
        assert_eq!(trie.query("192.168.1.20".parse()?).value(), Some(&"Network 3"));
        assert!(!trie.query("192.168.1.40".parse()?).found());
        Ok(())
    }

    #[test]
    fn test_delete_default_route() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert("0.0.0.0/0".parse()?, "Root Network");
        assert!(trie.delete("0.0.0.0/0".parse()?));
        assert!(!trie.query("192.168.1.1".parse()?).found());

        // The emptied trie is fully usable again.
        trie.insert("10.0.0.0/8".parse()?, "A");
        trie.insert("0.0.0.0/0".parse()?, "default");
        trie.validate()?;
        check_queries(
            &trie,
            &[
                ("10.1.1.1", "A", "10.0.0.0/8"),
                ("192.168.1.1", "default", "0.0.0.0/0"),
            ],
        )
    }

    #[test]
    fn test_len() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert("192.168.0.0/16".parse()?, "Network 1");
        trie.insert("192.168.1.0/24".parse()?, "Network 2");
        assert_eq!(trie.len(), 2);

        trie.insert("192.168.1.0/24".parse()?, "Network 3");
        assert_eq!(trie.len(), 2);

        trie.delete("192.168.0.0/16".parse()?);
        assert_eq!(trie.len(), 1);

        trie.clear();
        assert_eq!(trie.len(), 0);
        assert!(!trie.query("192.168.1.1".parse()?).found());
        Ok(())
    }

    #[test]
    fn test_get_is_exact() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert("10.0.0.0/8".parse()?, PrefixAs(64500));
        trie.insert("10.10.0.0/16".parse()?, PrefixAs(64501));

        assert_eq!(trie.get("10.10.0.0/16".parse()?), Some(&PrefixAs(64501)));
        assert_eq!(trie.get("10.10.0.0/24".parse()?), None);
        assert_eq!(trie.get("10.0.0.0/7".parse()?), None);
        assert!(trie.contains_prefix("10.0.0.0/8".parse()?));
        assert!(!trie.contains_prefix("11.0.0.0/8".parse()?));

        assert_eq!(trie.remove("10.0.0.0/8".parse()?), Some(PrefixAs(64500)));
        assert_eq!(trie.get("10.0.0.0/8".parse()?), None);
        assert_eq!(
            trie.query("10.10.1.1".parse()?).cloned(),
            Some(("10.10.0.0/16".parse()?, PrefixAs(64501)))
        );
        Ok(())
    }

    #[test]
    fn test_host_bits_are_ignored() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert(Ipv4Prefix::new(Ipv4Addr::new(10, 1, 2, 3), 8)?, 1);
        assert_eq!(trie.get("10.0.0.0/8".parse()?), Some(&1));
        assert!(trie.delete("10.255.255.255/8".parse()?));
        assert!(trie.is_empty());
        Ok(())
    }

    #[test]
    fn test_inetnum_bridges() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        let v4 = Prefix::from_str("130.55.240.0/24")?;
        assert_eq!(trie.insert_prefix(&v4, "A")?, None);
        assert_eq!(trie.insert_prefix(&v4, "B")?, Some("A"));

        let m = trie.query_addr(IpAddr::V4(Ipv4Addr::new(130, 55, 240, 9)))?;
        assert_eq!(m.value(), Some(&"B"));
        assert_eq!(m.prefix().map(Prefix::from), Some(v4));

        let v6 = Prefix::from_str("2001:db8::/32")?;
        assert_eq!(
            trie.insert_prefix(&v6, "C"),
            Err(PrefixTrieError::AddressFamilyNotSupported)
        );
        assert_eq!(
            trie.delete_prefix(&v6),
            Err(PrefixTrieError::AddressFamilyNotSupported)
        );
        assert!(trie
            .query_addr(IpAddr::from_str("2001:db8::1")?)
            .is_err());

        assert!(trie.delete_prefix(&v4)?);
        assert!(trie.is_empty());
        Ok(())
    }

    #[test]
    fn test_full_address_space() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        // Every /8, then every /8 again as a /9 split.
        let mut trie = RadixTrie::new();
        for octet in 0..=255u8 {
            trie.insert(Ipv4Prefix::new(Ipv4Addr::new(octet, 0, 0, 0), 8)?, octet);
        }
        for octet in (0..=255u8).step_by(2) {
            trie.insert(Ipv4Prefix::new(Ipv4Addr::new(octet, 128, 0, 0), 9)?, 0);
        }
        trie.validate()?;
        assert_eq!(trie.len(), 256 + 128);

        for octet in 0..=255u8 {
            let m = trie.query(Ipv4Addr::new(octet, 1, 2, 3));
            assert_eq!(m.value(), Some(&octet));
            let m = trie.query(Ipv4Addr::new(octet, 200, 2, 3));
            let expected = if octet % 2 == 0 { 0 } else { octet };
            assert_eq!(m.value(), Some(&expected));
        }

        for octet in 0..=255u8 {
            assert!(trie.delete(Ipv4Prefix::new(Ipv4Addr::new(octet, 0, 0, 0), 8)?));
        }
        trie.validate()?;
        assert_eq!(trie.len(), 128);
        assert!(!trie.query(Ipv4Addr::new(4, 1, 2, 3)).found());
        assert_eq!(trie.query(Ipv4Addr::new(4, 129, 2, 3)).value(), Some(&0));
        Ok(())
    }

    #[test]
    fn test_display_and_stats() -> Result<(), Box<dyn Error>> {
        crate::common::init();

        let mut trie = RadixTrie::new();
        trie.insert("10.0.0.0/8".parse()?, PrefixAs(64500));
        trie.insert("10.1.0.0/16".parse()?, PrefixAs(64501));
        trie.insert("10.2.0.0/16".parse()?, PrefixAs(64502));

        assert_eq!(
            trie.dump(),
            "10.0.0.0/8: AS64500\n10.1.0.0/16: AS64501\n10.2.0.0/16: AS64502"
        );
        assert_eq!(
            trie.query("10.2.3.4".parse()?).to_string(),
            "10.2.0.0/16: AS64502"
        );
        assert_eq!(trie.query("11.2.3.4".parse()?).to_string(), "no match");

        let stats = trie.stats();
        assert_eq!(stats.prefixes, 3);
        assert_eq!(stats.branch_nodes, 1);
        assert_eq!(stats.nodes, 4);
        assert_eq!(stats.max_prefix_len, 16);
        Ok(())
    }
}
