//Network byte order type system
//
//Header fields live on the wire in big-endian order regardless of the host
//CPU. Net<T> stores a value exclusively in network order and makes the
//host/network distinction part of the type, so a missing (or doubled)
//byte swap fails to compile instead of silently corrupting a header field.

use core::fmt;
use core::ops::{Add, Sub};

#[cfg(not(any(target_endian = "little", target_endian = "big")))]
compile_error!("host byte order could not be determined");

/// Conversion between host and network byte order for a fixed-width
/// unsigned integer.
pub trait NetworkEndian: Copy {
    fn to_network(self) -> Self;
    fn to_host(self) -> Self;
}

// 16- and 32-bit widths use the platform conversion primitives
// (the htons/ntohs and htonl/ntohl equivalents).
macro_rules! endian_primitive {
    ($($t:ty),*) => {$(
        impl NetworkEndian for $t {
            fn to_network(self) -> Self {
                self.to_be()
            }

            fn to_host(self) -> Self {
                Self::from_be(self)
            }
        }
    )*};
}

// Every other width falls back to a plain byte reversal: a no-op on a
// big-endian host, a full swap on a little-endian one.
macro_rules! endian_swap {
    ($($t:ty),*) => {$(
        impl NetworkEndian for $t {
            #[cfg(target_endian = "little")]
            fn to_network(self) -> Self {
                self.swap_bytes()
            }

            #[cfg(target_endian = "big")]
            fn to_network(self) -> Self {
                self
            }

            fn to_host(self) -> Self {
                // Byte-order transforms are involutive.
                self.to_network()
            }
        }
    )*};
}

endian_primitive!(u16, u32);
endian_swap!(u8, u64, u128);

/// A value of type `T` held in network byte order.
///
/// Use [`Net::new`] to construct from a host byte order value and
/// [`Net::from_net`] to construct from a value which is already in network
/// byte order. [`Net::net`] returns the raw network-order bits and
/// [`Net::host`] converts back to host order.
///
/// Equality and hashing operate on the stored network-order bits directly;
/// byte-order transforms are bijective, so this agrees with host-order
/// equality while skipping the conversion. There is deliberately no
/// `Ord`: network-order bits are not meaningfully ordered on a
/// little-endian host.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Net<T> {
    net: T,
}

pub type NetU16 = Net<u16>;
pub type NetU32 = Net<u32>;

impl<T: NetworkEndian> Net<T> {
    /// Tag a host byte order value, converting it to network order.
    pub fn new(host: T) -> Self {
        Self {
            net: host.to_network(),
        }
    }

    /// Wrap a value which is already in network byte order. No conversion
    /// is performed.
    pub fn from_net(net: T) -> Self {
        Self { net }
    }

    /// The value converted back to host byte order.
    pub fn host(self) -> T {
        self.net.to_host()
    }

    /// The raw network byte order bits, as laid out on the wire.
    pub fn net(self) -> T {
        self.net
    }
}

impl<T: NetworkEndian + PartialEq> PartialEq<T> for Net<T> {
    fn eq(&self, other: &T) -> bool {
        self.host() == *other
    }
}

// Arithmetic is performed in host order and the result re-tagged; the raw
// network-order bits are not arithmetically meaningful on a little-endian
// host.
impl<T: NetworkEndian + Add<Output = T>> Add for Net<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.host() + rhs.host())
    }
}

impl<T: NetworkEndian + Add<Output = T>> Add<T> for Net<T> {
    type Output = Self;

    fn add(self, rhs: T) -> Self {
        Self::new(self.host() + rhs)
    }
}

impl<T: NetworkEndian + Sub<Output = T>> Sub for Net<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.host() - rhs.host())
    }
}

impl<T: NetworkEndian + Sub<Output = T>> Sub<T> for Net<T> {
    type Output = Self;

    fn sub(self, rhs: T) -> Self {
        Self::new(self.host() - rhs)
    }
}

// host-order left operands, per concrete width
macro_rules! host_lhs_ops {
    ($($t:ty),*) => {$(
        impl Add<Net<$t>> for $t {
            type Output = Net<$t>;

            fn add(self, rhs: Net<$t>) -> Net<$t> {
                Net::new(self + rhs.host())
            }
        }

        impl Sub<Net<$t>> for $t {
            type Output = Net<$t>;

            fn sub(self, rhs: Net<$t>) -> Net<$t> {
                Net::new(self - rhs.host())
            }
        }
    )*};
}

host_lhs_ops!(u16, u32, u64);

impl<T: NetworkEndian + fmt::Debug> fmt::Debug for Net<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Render the host value; raw network bits read backwards in logs.
        write!(f, "Net({:?})", self.host())
    }
}
