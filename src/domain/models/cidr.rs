//! CIDR Value Object
//!
//! IPv4 CIDR arithmetic over the 32-bit address space. A `Cidr` is always
//! canonical: host bits of the input are cleared on parse, so `10.0.1.5/24`
//! and `10.0.1.0/24` denote the same block. Non-canonical input is accepted
//! and normalized rather than rejected, matching the registry's lenient
//! parsing policy.

use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::shared::errors::DomainError;

/// Inclusive integer range over the IPv4 address space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpRange {
    pub start: u32,
    pub end: u32,
}

impl IpRange {
    /// True iff the two ranges share at least one address.
    ///
    /// This is the sole overlap test used anywhere in the engine:
    /// `a.start <= b.end && a.end >= b.start`.
    #[must_use]
    pub fn overlaps(&self, other: &IpRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// True iff `self` lies entirely inside `root`
    #[must_use]
    pub fn within(&self, root: &IpRange) -> bool {
        root.start <= self.start && self.end <= root.end
    }

    /// True iff `addr` falls inside the range
    #[must_use]
    pub fn contains(&self, addr: u32) -> bool {
        self.start <= addr && addr <= self.end
    }
}

/// A canonical IPv4 network: network address plus prefix length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cidr {
    network: u32,
    prefix: u8,
}

impl Cidr {
    /// Build a CIDR from a network integer and prefix length, clearing any
    /// host bits. Fails with `MalformedCidr` when `prefix > 32`.
    pub fn from_parts(network: u32, prefix: u8) -> Result<Self, DomainError> {
        if prefix > 32 {
            return Err(DomainError::MalformedCidr(format!("{}/{}", Ipv4Addr::from(network), prefix)));
        }
        Ok(Self {
            network: network & Self::netmask(prefix),
            prefix,
        })
    }

    /// Parse `a.b.c.d/p` notation.
    ///
    /// The address must be four dot-separated octets 0-255 and the prefix an
    /// integer 0-32; anything else is `MalformedCidr`. Host bits are cleared.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let malformed = || DomainError::MalformedCidr(input.to_string());

        let (addr_part, prefix_part) = input.split_once('/').ok_or_else(malformed)?;
        let addr: Ipv4Addr = addr_part.parse().map_err(|_| malformed())?;
        let prefix: u8 = prefix_part.parse().map_err(|_| malformed())?;
        if prefix > 32 {
            return Err(malformed());
        }

        Ok(Self {
            network: u32::from(addr) & Self::netmask(prefix),
            prefix,
        })
    }

    fn netmask(prefix: u8) -> u32 {
        if prefix == 0 {
            0
        } else {
            u32::MAX << (32 - prefix)
        }
    }

    /// Network address (lowest address of the block)
    #[must_use]
    pub fn network(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.network)
    }

    /// Broadcast address (highest address of the block)
    #[must_use]
    pub fn broadcast(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.network | !Self::netmask(self.prefix))
    }

    #[must_use]
    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Number of addresses in the block, including network and broadcast
    #[must_use]
    pub fn block_size(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix))
    }

    /// The block as an inclusive integer range `[network, broadcast]`
    #[must_use]
    pub fn range(&self) -> IpRange {
        IpRange {
            start: self.network,
            end: self.network | !Self::netmask(self.prefix),
        }
    }

    /// Usable host range `[network+1, broadcast-1]` as integers.
    ///
    /// The first and last slot are excluded uniformly, so `/31` and `/32`
    /// blocks have no usable addresses and return `None`.
    #[must_use]
    pub fn usable_range(&self) -> Option<IpRange> {
        if self.block_size() <= 2 {
            return None;
        }
        let r = self.range();
        Some(IpRange {
            start: r.start + 1,
            end: r.end - 1,
        })
    }

    /// Number of usable host addresses
    #[must_use]
    pub fn usable_count(&self) -> u64 {
        self.block_size().saturating_sub(2)
    }

    /// Iterate the usable host addresses in ascending order
    pub fn usable_hosts(&self) -> impl Iterator<Item = Ipv4Addr> {
        let range = self.usable_range();
        range
            .into_iter()
            .flat_map(|r| (r.start..=r.end).map(Ipv4Addr::from))
    }

    /// True iff `addr` is a usable host address of this block
    #[must_use]
    pub fn is_usable_host(&self, addr: Ipv4Addr) -> bool {
        self.usable_range()
            .is_some_and(|r| r.contains(u32::from(addr)))
    }
}

impl std::fmt::Display for Cidr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.network(), self.prefix)
    }
}

impl FromStr for Cidr {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
