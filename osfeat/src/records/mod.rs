pub mod packet_record;
