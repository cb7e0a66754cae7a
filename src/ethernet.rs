//! Example protocol descriptions: link-layer frame header and
//! address-resolution header. Pure data fed into the core.

use crate::model::{
    Attribute, Entry, Field, Format, Module, ModelError, Protocol, Reference, Structure, Type,
};

/// The `Ethernet` module: size and EtherType constants, address aliases,
/// and the packed frame header.
pub fn ethernet() -> Result<Module, ModelError> {
    let mut m = Module::new("Ethernet");

    m.insert_anonymous(Entry::Blank);
    m.insert("minPacketSize", Entry::constant(Type::uint8(Format::Dec), 64))?;
    m.insert("maxPacketSize", Entry::constant(Type::uint8(Format::Dec), 1518))?;
    m.insert("maxPayloadSize", Entry::constant(Type::uint8(Format::Dec), 1500))?;
    m.insert("headerSize", Entry::constant(Type::uint8(Format::Dec), 14))?;

    m.insert_anonymous(Entry::Blank);
    m.insert("etherType_ARP", Entry::constant(Type::uint8(Format::Hex), 0x0806))?;
    m.insert("etherType_IPv4", Entry::constant(Type::uint8(Format::Hex), 0x0800))?;
    m.insert("etherType_IPv6", Entry::constant(Type::uint8(Format::Hex), 0x86DD))?;
    m.insert("etherType_PROFINET", Entry::constant(Type::uint8(Format::Hex), 0x8892))?;
    m.insert("etherType_EtherCAT", Entry::constant(Type::uint8(Format::Hex), 0x88A4))?;

    m.insert_anonymous(Entry::Blank);
    m.insert("MACAddress", Entry::alias(Type::array(Type::partbyte(), 6)))?;
    m.insert("IPAddress", Entry::alias(Type::array(Type::partbyte(), 4)))?;

    m.insert_anonymous(Entry::Blank);
    m.insert(
        "Header",
        Entry::Structure(Structure::with_fields(
            vec![Attribute::Packed],
            vec![
                Field::new("sourceMAC", Type::reference(Reference::to("MACAddress", "Ethernet"))),
                Field::new(
                    "destinationMAC",
                    Type::reference(Reference::to("MACAddress", "Ethernet")),
                ),
                Field::new("typeOrLength", Type::uint16(Format::Dec)),
            ],
        )?),
    )?;

    Ok(m)
}

/// The `ARP` module, importing `Ethernet` for its address aliases.
pub fn arp(ethernet: &Module) -> Result<Module, ModelError> {
    let mut m = Module::new("ARP");
    m.add_import(ethernet);

    m.insert_anonymous(Entry::Blank);
    m.insert("headerSize", Entry::constant(Type::uint8(Format::Dec), 28))?;

    m.insert("hardwareType_Ethernet", Entry::constant(Type::uint8(Format::Hex), 1))?;
    m.insert("protocolType_IPv4", Entry::constant(Type::uint8(Format::Hex), 0x0800))?;
    m.insert("hardwareAddressLength_Ethernet", Entry::constant(Type::uint8(Format::Dec), 6))?;
    m.insert("protocolAddressLength_IPv4", Entry::constant(Type::uint8(Format::Dec), 4))?;

    m.insert("operation_request", Entry::constant(Type::uint16(Format::Dec), 1))?;
    m.insert("operation_reply", Entry::constant(Type::uint16(Format::Dec), 2))?;
    m.insert("operation_requestReverse", Entry::constant(Type::uint16(Format::Dec), 3))?;
    m.insert("operation_replyReverse", Entry::constant(Type::uint16(Format::Dec), 4))?;
    m.insert("operation_InARP_request", Entry::constant(Type::uint16(Format::Dec), 8))?;
    m.insert("operation_InARP_reply", Entry::constant(Type::uint16(Format::Dec), 9))?;
    m.insert("operation_ARP_NAK", Entry::constant(Type::uint16(Format::Dec), 10))?;

    m.insert_anonymous(Entry::Blank);
    m.insert(
        "Header",
        Entry::Structure(Structure::with_fields(
            vec![Attribute::Packed],
            vec![
                Field::new("hardwareType", Type::uint16(Format::Dec)),
                Field::new("protocolType", Type::uint16(Format::Dec)),
                Field::new("hardwareAddressLength", Type::uint8(Format::Dec)),
                Field::new("protocolAddressLength", Type::uint8(Format::Dec)),
                Field::new("operation", Type::uint16(Format::Dec)),
                Field::new(
                    "senderHardwareAddress",
                    Type::reference(Reference::to("MACAddress", "Ethernet")),
                ),
                Field::new(
                    "senderProtocolAddress",
                    Type::reference(Reference::to("IPAddress", "Ethernet")),
                ),
                Field::new(
                    "targetHardwareAddress",
                    Type::reference(Reference::to("MACAddress", "Ethernet")),
                ),
                Field::new(
                    "targetProtocolAddress",
                    Type::reference(Reference::to("MACAddress", "Ethernet")),
                ),
            ],
        )?),
    )?;

    Ok(m)
}

/// The full `EthernetProtocol`: `Ethernet` then `ARP`, in that order.
pub fn ethernet_protocol() -> Result<Protocol, ModelError> {
    let ethernet = ethernet()?;
    let arp = arp(&ethernet)?;
    Ok(Protocol::new("EthernetProtocol", vec![ethernet, arp]))
}
